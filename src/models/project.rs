use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: i32,
    pub usuario_id: i32,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub fecha_creacion: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
pub struct CreateProject {
    pub nombre: String,
    pub descripcion: Option<String>,
}

/// The project a dashboard view is showing.
///
/// An explicitly requested id wins; without one the user's lowest-id project is
/// used, and a user with no projects has no active project at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveProject {
    Requested(i32),
    Default(i32),
    None,
}

impl ActiveProject {
    /// `owned` must be ordered by id ascending.
    pub fn select(requested: Option<i32>, owned: &[Project]) -> Self {
        match requested {
            Some(id) => Self::Requested(id),
            None => owned
                .first()
                .map(|p| Self::Default(p.id))
                .unwrap_or(Self::None),
        }
    }

    pub fn id(&self) -> Option<i32> {
        match self {
            Self::Requested(id) | Self::Default(id) => Some(*id),
            Self::None => None,
        }
    }
}
