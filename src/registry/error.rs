/// Errors that can occur during registry operations and instance lookups
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("instance already exists: {service}/{instance_id}")]
    DuplicateInstance { service: String, instance_id: String },

    #[error("instance not found: {service}/{instance_id}")]
    InstanceNotFound { service: String, instance_id: String },

    #[error("service not found: {0}")]
    ServiceNotFound(String),

    #[error("instance source for '{service}' unavailable: {message}")]
    SourceUnavailable { service: String, message: String },
}
