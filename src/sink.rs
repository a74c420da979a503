use crate::snapshot::Snapshot;
use crate::utils::periodic_worker::PeriodicWorker;
use crate::{AddMessage, ErrorString};
use skipchannel::Receiver;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::spawn;
use std::time::Duration;
use tungstenite::{Message, WebSocket};

/// Sent once when the last contact is lifted.
pub const CLEAR_MESSAGE: &str = "{}";

/// Decides, per client, what to send for the current snapshot.
#[derive(Debug, Default)]
pub struct Poller {
    cleared: bool,
}

impl Poller {
    pub fn new() -> Poller {
        Poller { cleared: false }
    }

    pub fn message(&mut self, snapshot: &Snapshot) -> Option<String> {
        if snapshot.occupied_count() > 0 {
            self.cleared = false;
            let triples = snapshot.ready_triples();
            if triples.is_empty() {
                None
            } else {
                serde_json::to_string(&triples)
                    .map_err(|e| log::error!("Poller: cannot encode {:?}: {}", triples, e))
                    .ok()
            }
        } else if !self.cleared {
            self.cleared = true;
            Some(CLEAR_MESSAGE.to_string())
        } else {
            None
        }
    }
}

struct Client {
    socket: WebSocket<TcpStream>,
    poller: Poller,
}

impl Client {
    fn send(&mut self, snapshot: &Snapshot) -> Result<(), tungstenite::Error> {
        match self.poller.message(snapshot) {
            None => Ok(()),
            Some(message) => self.socket.send(Message::Text(message)),
        }
    }
}

/// WebSocket server sending every client its own stream of messages.
#[derive(Clone)]
pub struct Broadcaster {
    clients: Arc<Mutex<Vec<Client>>>,
}

impl Broadcaster {
    pub fn bind(address: &str) -> Result<(Broadcaster, SocketAddr), ErrorString> {
        let listener =
            TcpListener::bind(address).add_message(format!("cannot listen on {}", address))?;
        let local_address = listener.local_addr()?;
        let broadcaster = Broadcaster {
            clients: Arc::new(Mutex::new(vec![])),
        };
        let clone = broadcaster.clone();
        spawn(move || {
            for stream in listener.incoming() {
                match stream {
                    Ok(stream) => clone.add_client(stream),
                    Err(e) => log::warn!("Broadcaster: accept failed: {}", e),
                }
            }
        });
        Ok((broadcaster, local_address))
    }

    fn lock(&self) -> MutexGuard<Vec<Client>> {
        self.clients
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn add_client(&self, stream: TcpStream) {
        let peer = stream
            .peer_addr()
            .map(|address| address.to_string())
            .unwrap_or_else(|_| "unknown peer".to_string());
        let timeout = Some(Duration::from_millis(100));
        if let Err(e) = stream
            .set_write_timeout(timeout)
            .and_then(|()| stream.set_read_timeout(timeout))
        {
            log::warn!("Broadcaster: setting timeouts for {}: {}", peer, e);
        }
        match tungstenite::accept(stream) {
            Ok(socket) => {
                log::info!("client connected: {}", peer);
                self.lock().push(Client {
                    socket,
                    poller: Poller::new(),
                });
            }
            Err(_) => log::warn!("Broadcaster: websocket handshake with {} failed", peer),
        }
    }

    pub fn client_count(&self) -> usize {
        self.lock().len()
    }

    pub fn send(&self, snapshot: &Snapshot) {
        let mut clients = self.lock();
        let mut index = 0;
        while index < clients.len() {
            match clients[index].send(snapshot) {
                Ok(()) => index += 1,
                Err(e) => {
                    log::info!("dropping client: {}", e);
                    clients.remove(index);
                }
            }
        }
    }
}

/// Polls the newest snapshot every `interval` and broadcasts it.
pub fn spawn_sink(
    receiver: Receiver<Snapshot>,
    broadcaster: Broadcaster,
    interval: Duration,
) -> PeriodicWorker {
    let mut latest = Snapshot::default();
    PeriodicWorker::new(interval, move || {
        if let Some(snapshot) = receiver.recv() {
            latest = snapshot;
        }
        broadcaster.send(&latest);
    })
}
