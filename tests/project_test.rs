mod common;

use axum::http::StatusCode;

use common::{Factory, TestApp};
use tareas::repositories::{ProjectRepository, Repository};

#[tokio::test]
async fn test_create_project() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    let response = app
        .server
        .post("/crear_proyecto")
        .add_header("Authorization", auth.auth_header())
        .form(&[
            ("nombre_proyecto", "My New Project"),
            ("descripcion_proyecto", "Things to do"),
        ])
        .await;

    response.assert_status(StatusCode::SEE_OTHER);

    let projects = ProjectRepository::list_by_user(&app.state.db, auth.user_id)
        .await
        .unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].nombre, "My New Project");
    assert_eq!(projects[0].descripcion.as_deref(), Some("Things to do"));
    assert_eq!(
        response.header("location"),
        format!("/?proyecto_id={}", projects[0].id).as_str()
    );
}

#[tokio::test]
async fn test_create_project_without_description() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    let response = app
        .server
        .post("/crear_proyecto")
        .add_header("Authorization", auth.auth_header())
        .form(&[("nombre_proyecto", "Bare"), ("descripcion_proyecto", "")])
        .await;

    response.assert_status(StatusCode::SEE_OTHER);

    let projects = ProjectRepository::list_by_user(&app.state.db, auth.user_id)
        .await
        .unwrap();
    assert_eq!(projects[0].descripcion, None);
}

#[tokio::test]
async fn test_create_project_allows_duplicate_names() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    for _ in 0..2 {
        app.server
            .post("/crear_proyecto")
            .add_header("Authorization", auth.auth_header())
            .form(&[("nombre_proyecto", "Same")])
            .await
            .assert_status(StatusCode::SEE_OTHER);
    }

    assert_eq!(ProjectRepository::count(&app.state.db).await.unwrap(), 2);
}

#[tokio::test]
async fn test_create_project_requires_name() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    let response = app
        .server
        .post("/crear_proyecto")
        .add_header("Authorization", auth.auth_header())
        .form(&[("nombre_proyecto", "   ")])
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(ProjectRepository::count(&app.state.db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_project_unauthenticated() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/crear_proyecto")
        .form(&[("nombre_proyecto", "My Project")])
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/login");
    assert_eq!(ProjectRepository::count(&app.state.db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_dashboard_without_projects() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    let response = app
        .server
        .get("/")
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["proyectos"].as_array().unwrap().len(), 0);
    assert!(body["proyecto_activo_id"].is_null());
    assert!(body["proyecto_activo"].is_null());
    assert_eq!(body["tareas"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_dashboard_defaults_to_first_project() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    let first = factory.create_project_with_name(auth.user_id, "First").await;
    let second = factory.create_project_with_name(auth.user_id, "Second").await;
    factory.create_task(second.id, "Only in second", None).await;

    let response = app
        .server
        .get("/")
        .add_header("Authorization", auth.auth_header())
        .await;

    let body: serde_json::Value = response.json();
    assert_eq!(body["proyecto_activo_id"].as_i64().unwrap(), first.id as i64);
    assert_eq!(body["proyecto_activo"]["nombre"], "First");
    assert_eq!(body["tareas"].as_array().unwrap().len(), 0);

    let ids: Vec<i64> = body["proyectos"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![first.id as i64, second.id as i64]);
}

#[tokio::test]
async fn test_dashboard_selects_requested_project() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;

    factory.create_project_with_name(auth.user_id, "First").await;
    let second = factory.create_project_with_name(auth.user_id, "Second").await;
    factory.create_task(second.id, "Only in second", None).await;

    let response = app
        .server
        .get("/")
        .add_query_param("proyecto_id", second.id)
        .add_header("Authorization", auth.auth_header())
        .await;

    let body: serde_json::Value = response.json();
    assert_eq!(body["proyecto_activo_id"].as_i64().unwrap(), second.id as i64);
    let tareas = body["tareas"].as_array().unwrap();
    assert_eq!(tareas.len(), 1);
    assert_eq!(tareas[0]["titulo"], "Only in second");
}

#[tokio::test]
async fn test_dashboard_ignores_malformed_project_param() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let auth = factory.create_user().await;
    let first = factory.create_project(auth.user_id).await;

    let response = app
        .server
        .get("/?proyecto_id=abc")
        .add_header("Authorization", auth.auth_header())
        .await;

    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["proyecto_activo_id"].as_i64().unwrap(), first.id as i64);
}

#[tokio::test]
async fn test_dashboard_lists_only_own_projects() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let auth1 = factory.create_user().await;
    factory.create_project(auth1.user_id).await;
    factory.create_project(auth1.user_id).await;

    let auth2 = factory.create_user().await;
    factory.create_project(auth2.user_id).await;

    let response = app
        .server
        .get("/")
        .add_header("Authorization", auth2.auth_header())
        .await;

    let body: serde_json::Value = response.json();
    let proyectos = body["proyectos"].as_array().unwrap();
    assert_eq!(proyectos.len(), 1);
    assert_eq!(
        proyectos[0]["usuario_id"].as_i64().unwrap(),
        auth2.user_id as i64
    );
}

#[tokio::test]
async fn test_dashboard_hides_other_users_project() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);

    let owner = factory.create_user().await;
    let project = factory.create_project(owner.user_id).await;
    factory.create_task(project.id, "Private", None).await;

    let intruder = factory.create_user().await;

    let response = app
        .server
        .get("/")
        .add_query_param("proyecto_id", project.id)
        .add_header("Authorization", intruder.auth_header())
        .await;

    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert!(body["proyecto_activo"].is_null());
    assert_eq!(body["tareas"].as_array().unwrap().len(), 0);
}
