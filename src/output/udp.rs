//! UDP sink, one JSON datagram per command

use async_trait::async_trait;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use tokio::net::UdpSocket;
use tracing::{debug, info};

use super::{encode, VelocitySink};
use crate::error::{Result, TeleopError};
use crate::teleop::velocity::Velocity;

/// Sends commands to a fixed UDP address
///
/// Delivery is not acknowledged; a dropped datagram is superseded by the next
/// periodic republish.
#[derive(Debug)]
pub struct UdpSink {
    topic: String,
    socket: UdpSocket,
    target: SocketAddr,
}

impl UdpSink {
    /// Bind an ephemeral local port and connect it to `address`
    ///
    /// # Errors
    ///
    /// - `Output`: `address` is not a socket address
    /// - `Io`: the socket cannot be bound or connected
    pub async fn connect(topic: &str, address: &str) -> Result<Self> {
        let target: SocketAddr = address
            .parse()
            .map_err(|e| TeleopError::Output(format!("Invalid UDP address {}: {}", address, e)))?;

        let local: SocketAddr = if target.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };

        let socket = UdpSocket::bind(local).await?;
        socket.connect(target).await?;
        info!("Publishing '{}' over UDP to {}", topic, target);

        Ok(Self {
            topic: topic.to_string(),
            socket,
            target,
        })
    }

    pub fn target(&self) -> SocketAddr {
        self.target
    }
}

#[async_trait]
impl VelocitySink for UdpSink {
    async fn publish(&mut self, velocity: &Velocity) -> Result<()> {
        let datagram = encode(&self.topic, velocity)?;
        let sent = self.socket.send(&datagram).await?;
        debug!("Sent {} byte datagram to {}", sent, self.target);
        Ok(())
    }
}
