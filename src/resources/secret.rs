//! Secret manifest builder.

use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

use crate::config::schema::SecretConfig;

/// Build the demo secret.
///
/// Values go out via `stringData`, so the API server performs the base64
/// encoding; nothing is encoded client side.
pub fn build_secret(config: &SecretConfig) -> Secret {
    Secret {
        metadata: ObjectMeta {
            name: Some(config.name.clone()),
            ..Default::default()
        },
        string_data: Some(config.string_data.clone()),
        type_: Some(config.secret_type.clone()),
        ..Default::default()
    }
}
