use axum::http::StatusCode;
use futures_util::stream::StreamExt;
use lapin::{BasicProperties, Connection, ConnectionProperties, options::*, types::FieldTable};
use std::env;
use std::future::Future;
use tokio_executor_trait::Tokio as TokioExec;
use tokio_reactor_trait::Tokio as TokioReactor;

use crate::notification::models::OrderEvent;
use crate::utils::internal_error;

pub const ORDER_EVENTS_QUEUE: &str = "order_events";

async fn connect(url: &str) -> Result<Connection, (StatusCode, String)> {
    let conn = Connection::connect(
        url,
        ConnectionProperties::default()
            .with_executor(TokioExec::current())
            .with_reactor(TokioReactor),
    )
    .await
    .map_err(internal_error)?;

    Ok(conn)
}

pub async fn publish_event(queue: &str, payload: &str) -> Result<(), (StatusCode, String)> {
    let url = env::var("RMQ_URL").map_err(internal_error)?;

    let channel = connect(&url)
        .await?
        .create_channel()
        .await
        .map_err(internal_error)?;

    channel
        .queue_declare(queue, QueueDeclareOptions::default(), FieldTable::default())
        .await
        .map_err(internal_error)?;

    channel
        .basic_publish(
            "",
            queue,
            BasicPublishOptions::default(),
            payload.as_bytes(),
            BasicProperties::default(),
        )
        .await
        .map_err(internal_error)?
        .await
        .map_err(internal_error)?;

    Ok(())
}

pub async fn consume<Fut: Future<Output = Result<(), String>> + Send>(
    queue: &str,
    consumer_tag: &str,
    handler: impl Fn(OrderEvent) -> Fut + Send + Sync + 'static,
) -> Result<(), (StatusCode, String)> {
    let url = env::var("RMQ_URL").map_err(internal_error)?;

    let channel = connect(&url)
        .await?
        .create_channel()
        .await
        .map_err(internal_error)?;

    channel
        .queue_declare(queue, QueueDeclareOptions::default(), FieldTable::default())
        .await
        .map_err(internal_error)?;

    let mut consumer = channel
        .basic_consume(
            queue,
            consumer_tag,
            BasicConsumeOptions::default(),
            FieldTable::default(),
        )
        .await
        .map_err(internal_error)?;

    while let Some(delivery) = consumer.next().await {
        let delivery = delivery.map_err(internal_error)?;
        let data = String::from_utf8_lossy(&delivery.data);

        if let Ok(event) = serde_json::from_str::<OrderEvent>(&data) {
            if let Err(er) = handler(event).await {
                tracing::warn!("Failed to send an email: {:?}", er);
            }
        } else {
            tracing::warn!("Failed to parse a message: {:?}", data);
        }

        delivery
            .ack(BasicAckOptions::default())
            .await
            .map_err(internal_error)?;
    }

    Ok(())
}

pub fn spawn_consumer(queue: &'static str, tag: &'static str) {
    tokio::spawn(async move {
        if let Err(er) = consume(queue, tag, crate::notification::handlers::send_email).await {
            tracing::warn!("Consumer error: {:?}", er);
        }
    });
}
