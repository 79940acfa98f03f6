// src/common/error.rs

use thiserror::Error;
use uuid::Uuid;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Datas malformadas sobem como erro explícito, nunca viram comparação inválida.
    #[error("Data inválida: '{0}'")]
    InvalidDate(String),

    #[error("Data fora do intervalo suportado")]
    DateOutOfRange,

    #[error("Tipo de evento desconhecido: '{0}'")]
    UnknownEventType(String),

    #[error("Configuração não encontrada: {0}")]
    ConfigurationNotFound(String),

    #[error("Site não encontrado: {0}")]
    SiteNotFound(Uuid),

    #[error("Unidade não encontrada: {0}")]
    UnitNotFound(Uuid),

    // O vínculo site -> configuração é permanente.
    #[error("O campo '{0}' não pode ser alterado após a criação")]
    BindingImmutable(&'static str),

    #[error("Unidade já ativada: {0}")]
    UnitAlreadyActivated(Uuid),

    #[error("Unidade ainda não ativada: {0}")]
    UnitNotActivated(Uuid),

    #[error("Unidade já encerrada: {0}")]
    UnitAlreadyTerminated(Uuid),

    // Encerramento só vale entre a ativação e o fim natural do aluguel.
    #[error("Data de encerramento anterior à ativação da unidade {0}")]
    TerminationBeforeActivation(Uuid),

    #[error("Contrato da unidade {0} já venceu; não há o que encerrar")]
    ContractAlreadyExpired(Uuid),

    #[error("Erro de configuração: {0}")]
    Config(String),

    #[error("Erro de JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    /// Código estável para quem traduz as mensagens (ex: a camada de apresentação).
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation_error",
            AppError::InvalidDate(_) => "invalid_date",
            AppError::DateOutOfRange => "date_out_of_range",
            AppError::UnknownEventType(_) => "unknown_event_type",
            AppError::ConfigurationNotFound(_) => "configuration_not_found",
            AppError::SiteNotFound(_) => "site_not_found",
            AppError::UnitNotFound(_) => "unit_not_found",
            AppError::BindingImmutable(_) => "binding_immutable",
            AppError::UnitAlreadyActivated(_) => "unit_already_activated",
            AppError::UnitNotActivated(_) => "unit_not_activated",
            AppError::UnitAlreadyTerminated(_) => "unit_already_terminated",
            AppError::TerminationBeforeActivation(_) => "termination_before_activation",
            AppError::ContractAlreadyExpired(_) => "contract_already_expired",
            AppError::Config(_) => "config_error",
            AppError::JsonError(_) => "json_error",
            AppError::InternalServerError(_) => "internal_error",
        }
    }

    // Helper para criar erro de validação atribuído a um campo
    pub fn validation(field: &'static str, code: &'static str, message: &str) -> Self {
        let mut errors = validator::ValidationErrors::new();
        let mut err = validator::ValidationError::new(code);
        err.message = Some(message.to_string().into());
        errors.add(field, err);
        AppError::ValidationError(errors)
    }

    /// Detalhes por campo, no mesmo formato que era devolvido pela API.
    pub fn field_details(&self) -> std::collections::HashMap<String, Vec<String>> {
        let mut details = std::collections::HashMap::new();
        if let AppError::ValidationError(errors) = self {
            for (field, field_errors) in errors.field_errors() {
                let messages: Vec<String> = field_errors
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .collect();
                details.insert(field.to_string(), messages);
            }
        }
        details
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_helper_keeps_field_and_message() {
        let err = AppError::validation("installationCharge", "required", "Valor obrigatório.");
        assert_eq!(err.code(), "validation_error");

        let details = err.field_details();
        assert_eq!(details["installationCharge"], vec!["Valor obrigatório.".to_string()]);
    }

    #[test]
    fn non_validation_errors_have_no_details() {
        let err = AppError::UnknownEventType("TELEPORTED".into());
        assert!(err.field_details().is_empty());
        assert_eq!(err.code(), "unknown_event_type");
        assert_eq!(err.to_string(), "Tipo de evento desconhecido: 'TELEPORTED'");
    }
}
