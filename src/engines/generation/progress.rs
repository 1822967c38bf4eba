use super::evolution_engine::{GenerationRecord, ProgressCallback};

/// Logs each generation through the `log` facade.
pub struct ConsoleProgressCallback;

impl ProgressCallback for ConsoleProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        log::debug!("Generation {} starting...", generation);
    }

    fn on_generation_complete(&mut self, record: &GenerationRecord) {
        log::info!(
            "=== Generation {} === penalty: {}, close: {}, distance: {}, transitions: {}, total: {:.3}",
            record.generation,
            record.score.penalty,
            record.score.close_penalty,
            record.score.distance,
            record.score.transitions,
            record.score.total
        );
    }
}

// For handing progress to another thread (writers, plotters)
pub struct ChannelProgressCallback {
    sender: std::sync::mpsc::Sender<ProgressMessage>,
}

#[derive(Debug, Clone)]
pub enum ProgressMessage {
    GenerationStart(usize),
    GenerationComplete(GenerationRecord),
}

impl ChannelProgressCallback {
    pub fn new(sender: std::sync::mpsc::Sender<ProgressMessage>) -> Self {
        Self { sender }
    }
}

impl ProgressCallback for ChannelProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        if self
            .sender
            .send(ProgressMessage::GenerationStart(generation))
            .is_err()
        {
            log::debug!("Progress receiver dropped at generation {} start", generation);
        }
    }

    fn on_generation_complete(&mut self, record: &GenerationRecord) {
        if self
            .sender
            .send(ProgressMessage::GenerationComplete(record.clone()))
            .is_err()
        {
            log::debug!(
                "Progress receiver dropped, generation {} not delivered",
                record.generation
            );
        }
    }
}
