//! CRUD handlers for the tasks resource.
//!
//! Handlers take the per-request `HandlingContext`, perform their suspending
//! work (body read, store calls), and write the response through the
//! context. Every failure surfaces as `Err` and travels through the fault
//! barrier to the centralized failure stage; nothing is caught locally.

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::fault::{Fault, HandlingContext};
use crate::http::error::ApiError;
use crate::tasks::model::{CreateTask, Task, UpdateTask};

const COLLECTION: &str = "tasks";

#[derive(Serialize)]
struct TaskBody {
    task: Task,
}

#[derive(Serialize)]
struct TaskList {
    tasks: Vec<Task>,
}

fn task_id(ctx: &HandlingContext) -> Result<Uuid, Fault> {
    // Set by the route adapter for every /{id} route.
    ctx.params
        .id
        .ok_or_else(|| ApiError::BadRequest("missing task id".to_string()))
}

/// `GET /api/v1/tasks`
pub async fn list_tasks(ctx: HandlingContext) -> Result<(), Fault> {
    let tasks: Vec<Task> = ctx.state().store.collection(COLLECTION).list().await?;
    ctx.respond(Json(TaskList { tasks }));
    Ok(())
}

/// `POST /api/v1/tasks`
pub async fn create_task(mut ctx: HandlingContext) -> Result<(), Fault> {
    let payload: CreateTask = ctx.read_json().await?;
    let task = Task::new(payload);

    let col = ctx.state().store.collection(COLLECTION);
    col.insert(task.id, &task).await?;

    tracing::debug!(task_id = %task.id, "Task created");
    ctx.respond((StatusCode::CREATED, Json(TaskBody { task })));
    Ok(())
}

/// `GET /api/v1/tasks/{id}`
pub async fn get_task(ctx: HandlingContext) -> Result<(), Fault> {
    let id = task_id(&ctx)?;
    let col = ctx.state().store.collection(COLLECTION);

    let task: Task = col.get(&id).await?.ok_or(ApiError::TaskNotFound(id))?;
    ctx.respond(Json(TaskBody { task }));
    Ok(())
}

/// `PATCH /api/v1/tasks/{id}`
///
/// Partial update: absent fields keep their stored values.
pub async fn update_task(mut ctx: HandlingContext) -> Result<(), Fault> {
    let id = task_id(&ctx)?;
    let payload: UpdateTask = ctx.read_json().await?;

    let col = ctx.state().store.collection(COLLECTION);
    let mut task: Task = col.get(&id).await?.ok_or(ApiError::TaskNotFound(id))?;

    if let Some(name) = payload.name {
        task.name = name;
    }
    if let Some(completed) = payload.completed {
        task.completed = completed;
    }

    // The document can be removed between the read and the write; a failed
    // replace reports not-found rather than resurrecting it.
    if !col.replace(id, &task).await? {
        return Err(ApiError::TaskNotFound(id));
    }

    ctx.respond(Json(TaskBody { task }));
    Ok(())
}

/// `DELETE /api/v1/tasks/{id}`
pub async fn delete_task(ctx: HandlingContext) -> Result<(), Fault> {
    let id = task_id(&ctx)?;
    let col = ctx.state().store.collection(COLLECTION);

    let task: Task = col.remove(&id).await?.ok_or(ApiError::TaskNotFound(id))?;

    tracing::debug!(task_id = %id, "Task deleted");
    ctx.respond(Json(TaskBody { task }));
    Ok(())
}
