use std::net::{SocketAddr, TcpListener, TcpStream};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use embedded_hal::digital::OutputPin;
use log::{info, warn};
use pinctl::{Dispatcher, Platform, Response, StatusCode};

use crate::wire;

/// Pause after a failed `accept` before trying again.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(200);

/// Accepts connections and hands each request to a [`Dispatcher`].
///
/// Connections are handled strictly one after another: a request, including
/// any sampling it asks for, is answered and the connection closed before the
/// next one is accepted.
pub struct Server {
    listener: TcpListener,
    read_timeout: Duration,
    write_timeout: Duration,
}

impl Server {
    pub fn bind(addr: &str, read_timeout: Duration, write_timeout: Duration) -> Result<Self> {
        let listener = TcpListener::bind(addr).with_context(|| format!("binding {addr}"))?;
        Ok(Self {
            listener,
            read_timeout,
            write_timeout,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve requests forever.
    pub fn run<P: Platform, L: OutputPin>(&self, dispatcher: &mut Dispatcher<P, L>) -> ! {
        loop {
            self.serve_one(dispatcher);
        }
    }

    /// Accept a single connection and answer its request.
    ///
    /// Nothing here is fatal. A failed `accept` is logged and followed by a
    /// short pause; errors on the connection itself are logged and dropped.
    pub fn serve_one<P: Platform, L: OutputPin>(&self, dispatcher: &mut Dispatcher<P, L>) {
        let (stream, peer) = match self.listener.accept() {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!("accept error: {e}");
                thread::sleep(ACCEPT_BACKOFF);
                return;
            }
        };
        if let Err(e) = self.handle_conn(stream, peer, dispatcher) {
            warn!("{peer}: connection error: {e:#}");
        }
    }

    fn handle_conn<P: Platform, L: OutputPin>(
        &self,
        mut stream: TcpStream,
        peer: SocketAddr,
        dispatcher: &mut Dispatcher<P, L>,
    ) -> Result<()> {
        stream.set_read_timeout(Some(self.read_timeout))?;
        stream.set_write_timeout(Some(self.write_timeout))?;
        let request = match wire::read_request(&mut stream) {
            Ok(Some(request)) => request,
            Ok(None) => return Ok(()),
            Err(e) => {
                let response = Response::text(
                    StatusCode::BAD_REQUEST,
                    format!("Bad Request\n\n{e}\n"),
                );
                // The peer may already be gone.
                let _ = wire::write_response(&mut stream, &response);
                return Err(e);
            }
        };
        let response = dispatcher.dispatch(&request);
        info!(
            "{peer} {} {} -> {}",
            request.method, request.path, response.status
        );
        wire::write_response(&mut stream, &response).context("writing response")?;
        Ok(())
    }
}
