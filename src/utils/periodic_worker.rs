use skipchannel::*;
use std::thread::{sleep, spawn, JoinHandle};
use std::time::Duration;

enum Message {
    StopThread,
}

/// Runs an action on its own thread at a fixed cadence until dropped.
pub struct PeriodicWorker {
    thread: Option<JoinHandle<()>>,
    to_worker_thread: Sender<Message>,
}

impl Drop for PeriodicWorker {
    fn drop(&mut self) {
        self.to_worker_thread.send(Message::StopThread);
        let thread = std::mem::replace(&mut self.thread, None);
        match thread {
            None => {}
            Some(join_handle) => {
                match join_handle.join() {
                    Ok(()) => {}
                    Err(error) => log::error!("periodic worker panicked: {:?}", error),
                };
            }
        }
    }
}

impl PeriodicWorker {
    pub fn new<F>(interval: Duration, mut action: F) -> PeriodicWorker
    where
        F: FnMut() + Send + 'static,
    {
        let (to_worker_thread, worker_thread_source) = skipchannel();
        let thread = spawn(move || loop {
            match worker_thread_source.recv() {
                None => {}
                Some(Message::StopThread) => break,
            };
            action();
            sleep(interval);
        });
        PeriodicWorker {
            thread: Some(thread),
            to_worker_thread,
        }
    }
}
