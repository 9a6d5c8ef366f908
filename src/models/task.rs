use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: i32,
    pub proyecto_id: i32,
    pub parent_id: Option<i32>,
    pub titulo: String,
    pub descripcion: Option<String>,
    pub completada: bool,
    pub fecha_creacion: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
pub struct CreateTask {
    pub titulo: String,
    pub descripcion: Option<String>,
    pub parent_id: Option<i32>,
}
