use serde::Serialize;

use crate::models::row::{self, Row};
use crate::modules::ModuleKind;

/// Role string that unlocks the technical settings module.
pub const MASTER_ROLE: &str = "master_it";
pub const DEFAULT_ROLE: &str = "usuario";

/// A row of the `perfiles` table.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub id: Option<i64>,
    pub usuario: String,
    pub clave: String,
    pub rol: String,
}

impl UserProfile {
    pub fn from_row(row: &Row) -> Self {
        let rol = row::text(row, "rol");
        Self {
            id: row::id(row),
            usuario: row::text(row, "usuario"),
            clave: row::text(row, "clave"),
            rol: if rol.trim().is_empty() { DEFAULT_ROLE.to_string() } else { rol },
        }
    }

    pub fn role(&self) -> Role {
        Role::parse(&self.rol)
    }

    /// The part of the profile that is copied into a session.
    pub fn summary(&self) -> ProfileSummary {
        ProfileSummary {
            id: self.id,
            usuario: self.usuario.clone(),
            rol: self.rol.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileSummary {
    pub id: Option<i64>,
    pub usuario: String,
    pub rol: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    MasterIt,
    Standard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    ManageSettings,
    EditRecords,
    DeleteRecords,
}

impl Role {
    pub fn parse(raw: &str) -> Self {
        if raw == MASTER_ROLE {
            Role::MasterIt
        } else {
            Role::Standard
        }
    }

    pub fn capabilities(self) -> &'static [Capability] {
        match self {
            Role::MasterIt => &[
                Capability::ManageSettings,
                Capability::EditRecords,
                Capability::DeleteRecords,
            ],
            Role::Standard => &[Capability::EditRecords],
        }
    }

    pub fn can(self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }

    /// Sidebar entries visible to this role, in display order.
    pub fn menu(self) -> Vec<ModuleKind> {
        ModuleKind::ALL
            .iter()
            .copied()
            .filter(|kind| match kind.required_capability() {
                Some(cap) => self.can(cap),
                None => true,
            })
            .collect()
    }
}
