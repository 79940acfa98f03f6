// src/models/site.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::common::error::AppError;

// --- SITE ---
// O vínculo com a configuração é fixado na criação e nunca muda.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub id: Uuid,
    pub name: String,
    pub address: Option<String>,

    pub project_id: Uuid,
    pub subproject_id: Option<Uuid>,

    pub configuration_id: Uuid,
    pub configuration_version: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Só espaços conta como vazio, igual ao número de série da unidade.
fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some("O nome é obrigatório.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewSitePayload {
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
    pub address: Option<String>,
    pub project_id: Uuid,
    pub subproject_id: Option<Uuid>,
}

// Campos de vínculo aparecem aqui só para serem recusados:
// o formulário de edição pode reenviá-los, mas não pode mudá-los.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSitePayload {
    #[validate(custom(function = "validate_not_blank"))]
    pub name: Option<String>,
    pub address: Option<String>,

    pub project_id: Option<Uuid>,
    pub subproject_id: Option<Uuid>,
    pub configuration_id: Option<Uuid>,
}

impl UpdateSitePayload {
    /// Recusa qualquer tentativa de trocar projeto, subprojeto ou configuração.
    pub fn check_binding(&self, site: &Site) -> Result<(), AppError> {
        if self.project_id.is_some_and(|id| id != site.project_id) {
            return Err(AppError::BindingImmutable("projectId"));
        }
        if self.subproject_id.is_some() && self.subproject_id != site.subproject_id {
            return Err(AppError::BindingImmutable("subprojectId"));
        }
        if self.configuration_id.is_some_and(|id| id != site.configuration_id) {
            return Err(AppError::BindingImmutable("configurationId"));
        }
        Ok(())
    }
}
