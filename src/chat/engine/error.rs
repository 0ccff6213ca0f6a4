use crate::chat::{attachment::AttachmentError, client::ClientConfigError};

/// Failures that end a chat request before anything is stored.
///
/// Upstream completion failures are deliberately absent: they are stored and
/// returned as the assistant's reply.
#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum ChatError {
    #[error("Cuerpo de la solicitud inválido. Se requiere la clave 'mensaje'.")]
    Validation(String),

    #[error("El cliente de OpenAI no está configurado.")]
    ClientConfig(#[from] ClientConfigError),

    #[error(transparent)]
    Attachment(#[from] AttachmentError),
}
