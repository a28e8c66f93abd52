//! Drives the client state controller against a live server.

mod common;

use std::sync::Arc;

use chrono::{Duration, Utc};
use rstest::rstest;

use common::TestServer;
use task_manager::client::{
    ClientError, ClientStateController, EditForm, Filter, HttpTaskApi, TaskCard, TaskForm,
};
use task_manager::domain::{Priority, TaskId};

async fn connected() -> (TestServer, ClientStateController) {
    let server = TestServer::start().await;
    let api = Arc::new(HttpTaskApi::new(server.base_url.clone()));
    let controller = ClientStateController::new(api);
    controller.refresh().await.unwrap();
    (server, controller)
}

async fn create(controller: &ClientStateController, title: &str, priority: Option<Priority>) {
    let mut form = TaskForm::new(title);
    form.priority = priority;
    controller.create(&mut form).await.unwrap();
}

#[rstest]
#[tokio::test]
async fn test_create_then_refresh_round_trips() {
    let (_server, controller) = connected().await;
    let mut form = TaskForm::new("Buy milk");
    let now = Utc::now();
    form.set_due_date(now + Duration::days(1), now).unwrap();

    let created = controller.create(&mut form).await.unwrap();
    let local = controller.tasks().await;
    controller.refresh().await.unwrap();

    assert!(!created.completed);
    assert_eq!(created.priority, Priority::Low);
    assert!(created.due_date.is_some());
    assert_eq!(local, controller.tasks().await);
}

#[rstest]
#[tokio::test]
async fn test_blank_title_never_reaches_server() {
    let (_server, controller) = connected().await;

    let result = controller.create(&mut TaskForm::new("")).await;

    assert!(matches!(result, Err(ClientError::Form(_))));
    controller.refresh().await.unwrap();
    assert!(controller.tasks().await.is_empty());
}

#[rstest]
#[tokio::test]
async fn test_toggle_twice_returns_to_pending() {
    let (_server, controller) = connected().await;
    create(&controller, "toggle me", None).await;
    let task = controller.tasks().await.remove(0);

    let completed = controller.toggle_complete(&task).await.unwrap();
    let reopened = controller.toggle_complete(&completed).await.unwrap();

    assert!(completed.completed);
    assert!(!reopened.completed);
    assert!(TaskCard::from(&completed).struck_through);
    assert_eq!(controller.tasks().await, vec![reopened]);
}

#[rstest]
#[tokio::test]
async fn test_editing_completed_task_keeps_it_completed() {
    let (_server, controller) = connected().await;
    create(&controller, "ship it", Some(Priority::Medium)).await;
    let task = controller.tasks().await.remove(0);
    let completed = controller.toggle_complete(&task).await.unwrap();

    let mut edit = EditForm::from(&completed);
    edit.title = "shipped".to_string();
    edit.priority = Priority::High;
    let saved = controller.save_edit(completed.id, &edit).await.unwrap();

    assert!(saved.completed);
    assert_eq!(saved.title, "shipped");
    assert_eq!(saved.priority, Priority::High);
}

#[rstest]
#[tokio::test]
async fn test_delete_unknown_id_is_404_and_list_unchanged() {
    let (_server, controller) = connected().await;
    create(&controller, "keep me", None).await;
    let before = controller.tasks().await;

    let result = controller.delete(TaskId::generate()).await;

    assert_eq!(result.unwrap_err().status(), Some(404));
    assert_eq!(controller.tasks().await, before);
    controller.refresh().await.unwrap();
    assert_eq!(controller.tasks().await, before);
}

#[rstest]
#[tokio::test]
async fn test_delete_removes_everywhere() {
    let (_server, controller) = connected().await;
    create(&controller, "temporary", None).await;
    let task = controller.tasks().await.remove(0);

    controller.delete(task.id).await.unwrap();
    controller.refresh().await.unwrap();

    assert!(controller.tasks().await.is_empty());
}

#[rstest]
#[tokio::test]
async fn test_pending_view_puts_high_first() {
    let (_server, controller) = connected().await;
    create(&controller, "low one", Some(Priority::Low)).await;
    create(&controller, "high one", Some(Priority::High)).await;
    create(&controller, "medium one", Some(Priority::Medium)).await;
    let done = controller.tasks().await.remove(0);
    controller.toggle_complete(&done).await.unwrap();

    controller.set_filter(Filter::Pending).await;
    let pending: Vec<String> = controller
        .filtered_view()
        .await
        .into_iter()
        .map(|task| task.title)
        .collect();

    controller.set_filter(Filter::Completed).await;
    let completed: Vec<String> = controller
        .filtered_view()
        .await
        .into_iter()
        .map(|task| task.title)
        .collect();

    assert_eq!(pending, vec!["high one", "low one"]);
    assert_eq!(completed, vec!["medium one"]);
}

#[rstest]
#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let api = HttpTaskApi::new(format!("http://{address}"));
    let controller = ClientStateController::new(Arc::new(api));
    let result = controller.refresh().await;

    assert!(matches!(result, Err(ClientError::Transport(_))));
    assert!(controller.tasks().await.is_empty());
}
