/// Export-queue producer
///
/// Publishes playlist export requests to a durable RabbitMQ queue and
/// returns once the broker confirms the message. Consumption and email
/// delivery belong to the external export worker.
use crate::error::{ApiError, Result};
use lapin::{
    options::{BasicPublishOptions, ConfirmSelectOptions, QueueDeclareOptions},
    types::FieldTable,
    BasicProperties, Connection, ConnectionProperties,
};
use openmusic_core::PlaylistId;
use serde::Serialize;

/// Queue shared with the export worker
pub const EXPORT_QUEUE: &str = "export:playlists";

const PERSISTENT: u8 = 2;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportMessage<'a> {
    playlist_id: &'a str,
    target_email: &'a str,
}

pub struct ExportService {
    amqp_url: String,
}

impl ExportService {
    pub fn new(amqp_url: impl Into<String>) -> Self {
        Self {
            amqp_url: amqp_url.into(),
        }
    }

    /// Publish one export request; success means the message is durably
    /// queued, not that the export has run
    pub async fn enqueue(&self, playlist_id: &PlaylistId, target_email: &str) -> Result<()> {
        let payload = serde_json::to_vec(&ExportMessage {
            playlist_id: playlist_id.as_str(),
            target_email,
        })
        .map_err(|e| ApiError::Queue(e.to_string()))?;

        let connection = Connection::connect(&self.amqp_url, ConnectionProperties::default())
            .await
            .map_err(|e| ApiError::Queue(e.to_string()))?;

        let channel = connection
            .create_channel()
            .await
            .map_err(|e| ApiError::Queue(e.to_string()))?;

        // Publisher confirms: success below means the broker accepted the
        // message, not merely that it was written to the socket
        channel
            .confirm_select(ConfirmSelectOptions::default())
            .await
            .map_err(|e| ApiError::Queue(e.to_string()))?;

        channel
            .queue_declare(
                EXPORT_QUEUE,
                QueueDeclareOptions {
                    durable: true,
                    ..QueueDeclareOptions::default()
                },
                FieldTable::default(),
            )
            .await
            .map_err(|e| ApiError::Queue(e.to_string()))?;

        channel
            .basic_publish(
                "",
                EXPORT_QUEUE,
                BasicPublishOptions::default(),
                &payload,
                BasicProperties::default().with_delivery_mode(PERSISTENT),
            )
            .await
            .map_err(|e| ApiError::Queue(e.to_string()))?
            .await
            .map_err(|e| ApiError::Queue(e.to_string()))?;

        connection
            .close(0, "")
            .await
            .map_err(|e| ApiError::Queue(e.to_string()))?;

        Ok(())
    }
}
