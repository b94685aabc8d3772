//! Background job runner
//!
//! Runs work on worker threads and hands progress back to the UI thread
//! over a channel that the app drains on every tick.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use std::time::Instant;

/// Message sent from a worker thread
#[derive(Debug, Clone, PartialEq)]
pub enum JobMessage<T> {
    Progress(String),
    Completed(T),
    Error(String),
}

/// Sending half given to the worker
pub type JobSender<T> = Sender<JobMessage<T>>;

struct BackgroundJob<T> {
    id: u64,
    receiver: Receiver<JobMessage<T>>,
    start_instant: Instant,
    finished: bool,
}

/// Event observed by the UI thread
#[derive(Debug, Clone, PartialEq)]
pub struct JobEvent<T> {
    pub job_id: u64,
    pub message: JobMessage<T>,
    pub elapsed_secs: f64,
}

pub struct JobRunner<T> {
    jobs: Vec<BackgroundJob<T>>,
    next_id: u64,
}

impl<T> Default for JobRunner<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> JobRunner<T> {
    pub fn new() -> Self {
        Self {
            jobs: Vec::new(),
            next_id: 1,
        }
    }

    pub fn is_running(&self) -> bool {
        !self.jobs.is_empty()
    }

    pub fn running_count(&self) -> usize {
        self.jobs.len()
    }

    /// Drop every job. Their workers keep running until their next send
    /// fails, and nothing they produce is observed.
    pub fn clear(&mut self) {
        self.jobs.clear();
    }

    /// Drain pending messages from all jobs, forgetting finished ones
    pub fn poll(&mut self) -> Vec<JobEvent<T>> {
        let mut events = Vec::new();

        for job in &mut self.jobs {
            loop {
                match job.receiver.try_recv() {
                    Ok(message) => {
                        if !matches!(message, JobMessage::Progress(_)) {
                            job.finished = true;
                        }
                        events.push(JobEvent {
                            job_id: job.id,
                            message,
                            elapsed_secs: job.start_instant.elapsed().as_secs_f64(),
                        });
                        if job.finished {
                            break;
                        }
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        if !job.finished {
                            job.finished = true;
                            events.push(JobEvent {
                                job_id: job.id,
                                message: JobMessage::Error(
                                    "worker exited without a result".to_string(),
                                ),
                                elapsed_secs: job.start_instant.elapsed().as_secs_f64(),
                            });
                        }
                        break;
                    }
                }
            }
        }

        self.jobs.retain(|j| !j.finished);
        events
    }
}

impl<T: Send + 'static> JobRunner<T> {
    /// Spawn a job alongside any already running
    pub fn spawn<F>(&mut self, work: F) -> u64
    where
        F: FnOnce(&JobSender<T>) + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let id = self.next_id;
        self.next_id += 1;

        thread::spawn(move || work(&tx));

        self.jobs.push(BackgroundJob {
            id,
            receiver: rx,
            start_instant: Instant::now(),
            finished: false,
        });
        id
    }

    /// Spawn a job, discarding any job still running
    pub fn spawn_exclusive<F>(&mut self, work: F) -> u64
    where
        F: FnOnce(&JobSender<T>) + Send + 'static,
    {
        self.clear();
        self.spawn(work)
    }
}

#[cfg(test)]
pub(crate) fn poll_until_done<T>(runner: &mut JobRunner<T>) -> Vec<JobEvent<T>> {
    let mut events = Vec::new();
    let deadline = Instant::now() + std::time::Duration::from_secs(10);
    while runner.is_running() && Instant::now() < deadline {
        events.extend(runner.poll());
        thread::sleep(std::time::Duration::from_millis(5));
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_completes() {
        let mut runner: JobRunner<u32> = JobRunner::new();
        runner.spawn(|tx| {
            let _ = tx.send(JobMessage::Progress("half".to_string()));
            let _ = tx.send(JobMessage::Completed(7));
        });

        let events = poll_until_done(&mut runner);
        let messages: Vec<_> = events.into_iter().map(|e| e.message).collect();
        assert_eq!(
            messages,
            vec![JobMessage::Progress("half".to_string()), JobMessage::Completed(7)]
        );
        assert!(!runner.is_running());
    }

    #[test]
    fn test_worker_without_result_reports_error() {
        let mut runner: JobRunner<u32> = JobRunner::new();
        runner.spawn(|_tx| {});

        let events = poll_until_done(&mut runner);
        assert!(matches!(events.last().map(|e| &e.message), Some(JobMessage::Error(_))));
    }

    #[test]
    fn test_spawn_exclusive_discards_previous() {
        let mut runner: JobRunner<&'static str> = JobRunner::new();
        let (gate_tx, gate_rx) = mpsc::channel::<()>();
        let first = runner.spawn(move |tx| {
            let _ = gate_rx.recv();
            let _ = tx.send(JobMessage::Completed("stale"));
        });
        let second = runner.spawn_exclusive(|tx| {
            let _ = tx.send(JobMessage::Completed("fresh"));
        });
        assert_ne!(first, second);
        assert_eq!(runner.running_count(), 1);

        let _ = gate_tx.send(());
        let events = poll_until_done(&mut runner);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].job_id, second);
        assert_eq!(events[0].message, JobMessage::Completed("fresh"));
    }

    #[test]
    fn test_concurrent_jobs() {
        let mut runner: JobRunner<usize> = JobRunner::new();
        for i in 0..3 {
            runner.spawn(move |tx| {
                let _ = tx.send(JobMessage::Completed(i));
            });
        }
        let mut results: Vec<_> = poll_until_done(&mut runner)
            .into_iter()
            .filter_map(|e| match e.message {
                JobMessage::Completed(v) => Some(v),
                _ => None,
            })
            .collect();
        results.sort();
        assert_eq!(results, vec![0, 1, 2]);
    }
}
