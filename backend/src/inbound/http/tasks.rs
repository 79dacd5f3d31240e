//! Housekeeping and maintenance task handlers.
//!
//! ```text
//! GET  /tasks                                   tasks newest first, plus rooms for the form
//! POST /create_task                             form: room_id, task_type, description, assigned_to
//! GET  /complete_task/{task_id}
//! GET  /update_task_status/{task_id}/{status}   status: in_progress | completed
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::TaskTransition;
use crate::domain::{
    Error, Room, RoomId, TaskCompletion, TaskDraft, TaskId, TaskListing, TaskStatus,
    TaskValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::notice::FlashContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_value_error, parse_integer, required};

const TASKS_PATH: &str = "/tasks";

const ROOM_ID: FieldName = FieldName::new("room_id");
const TASK_TYPE: FieldName = FieldName::new("task_type");
const DESCRIPTION: FieldName = FieldName::new("description");
const STATUS: FieldName = FieldName::new("status");

#[derive(Debug, Serialize)]
struct TasksView {
    tasks: Vec<TaskListing>,
    rooms: Vec<Room>,
}

/// Form body for `POST /create_task`.
#[derive(Debug, Default, Deserialize)]
pub struct TaskForm {
    pub room_id: Option<String>,
    pub task_type: Option<String>,
    pub description: Option<String>,
    pub assigned_to: Option<String>,
}

impl TaskForm {
    fn into_draft(self) -> Result<TaskDraft, Error> {
        let room_id = RoomId::new(parse_integer(self.room_id, ROOM_ID)?);
        let task_type = required(self.task_type, TASK_TYPE)?;
        let description = required(self.description, DESCRIPTION)?;
        TaskDraft::new(room_id, task_type, description, self.assigned_to).map_err(|err| {
            let field = match err {
                TaskValidationError::EmptyType => TASK_TYPE,
                TaskValidationError::EmptyDescription => DESCRIPTION,
            };
            invalid_value_error(field, err)
        })
    }
}

fn completion_message(completion: &TaskCompletion) -> String {
    if completion.room_released {
        format!("Task completed. Room {} is available.", completion.room_id)
    } else {
        "Task completed".to_owned()
    }
}

#[get("/tasks")]
pub async fn list_tasks(
    state: web::Data<HttpState>,
    flash: FlashContext,
) -> ApiResult<HttpResponse> {
    let tasks = state.housekeeping.list_tasks().await?;
    let rooms = state.rooms.list_rooms().await?;
    Ok(HttpResponse::Ok().json(flash.page(TasksView { tasks, rooms })))
}

#[post("/create_task")]
pub async fn create_task(
    state: web::Data<HttpState>,
    flash: FlashContext,
    form: web::Form<TaskForm>,
) -> HttpResponse {
    let outcome = async {
        let draft = form.into_inner().into_draft()?;
        let task = state.housekeeping.create_task(draft).await?;
        Ok::<_, Error>(format!("Task {} created", task.id))
    }
    .await;
    flash.settle(outcome, TASKS_PATH, TASKS_PATH)
}

/// Complete a task; cleaning tasks release their room.
#[get("/complete_task/{task_id}")]
pub async fn complete_task(
    state: web::Data<HttpState>,
    flash: FlashContext,
    path: web::Path<i32>,
) -> HttpResponse {
    let task_id = TaskId::new(path.into_inner());
    let outcome = state
        .housekeeping
        .complete_task(task_id)
        .await
        .map(|completion| completion_message(&completion));
    flash.settle(outcome, TASKS_PATH, TASKS_PATH)
}

/// Move a task to `in_progress` or `completed`.
#[get("/update_task_status/{task_id}/{status}")]
pub async fn update_task_status(
    state: web::Data<HttpState>,
    flash: FlashContext,
    path: web::Path<(i32, String)>,
) -> HttpResponse {
    let (task_id, status) = path.into_inner();
    let outcome = async {
        let status = status
            .parse::<TaskStatus>()
            .map_err(|err| invalid_value_error(STATUS, err))?;
        let transition = state
            .housekeeping
            .update_task_status(TaskId::new(task_id), status)
            .await?;
        Ok::<_, Error>(match transition {
            TaskTransition::Started(task) => format!("Task {} started", task.id),
            TaskTransition::Completed(completion) => completion_message(&completion),
        })
    }
    .await;
    flash.settle(outcome, TASKS_PATH, TASKS_PATH)
}
