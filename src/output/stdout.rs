//! JSON lines sink, one command per line

use async_trait::async_trait;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::trace;

use super::{encode, VelocitySink};
use crate::error::Result;
use crate::teleop::velocity::Velocity;

/// Writes each command as a JSON line to any async writer
pub struct JsonLinesSink<W> {
    topic: String,
    writer: W,
}

impl JsonLinesSink<tokio::io::Stdout> {
    /// Sink on process stdout. Logs go to stderr, so stdout stays pipeable.
    pub fn stdout(topic: &str) -> Self {
        Self::new(topic, tokio::io::stdout())
    }
}

impl<W> JsonLinesSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(topic: &str, writer: W) -> Self {
        Self {
            topic: topic.to_string(),
            writer,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[async_trait]
impl<W> VelocitySink for JsonLinesSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn publish(&mut self, velocity: &Velocity) -> Result<()> {
        let mut line = encode(&self.topic, velocity)?;
        line.push(b'\n');

        self.writer.write_all(&line).await?;
        self.writer.flush().await?;

        trace!("Wrote {} byte command line", line.len());
        Ok(())
    }
}
