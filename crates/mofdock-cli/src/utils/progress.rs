use indicatif::{ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use mofdock::engine::progress::{Progress, ProgressCallback};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;

/// Renders the progress events of a single docking run.
#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let pb = ProgressBar::new(0)
            .with_style(spinner_style())
            .with_message("Initializing...");
        pb.set_draw_target(ProgressDrawTarget::stderr());
        pb.disable_steady_tick();
        pb.finish_and_clear();

        Self {
            pb: Arc::new(Mutex::new(pb)),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb_clone = self.pb.clone();

        Box::new(move |progress: Progress| {
            let Ok(mut pb_guard) = pb_clone.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::PhaseStart { name } => {
                    pb_guard.reset();
                    pb_guard.set_length(0);
                    pb_guard.set_style(spinner_style());
                    pb_guard.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                    pb_guard.set_message(name.to_string());
                }
                Progress::PhaseFinish => {
                    pb_guard.disable_steady_tick();
                    pb_guard.finish_with_message("✓ Done");
                }
                Progress::TaskStart { total_steps } => {
                    pb_guard.disable_steady_tick();
                    pb_guard.reset();
                    pb_guard.set_length(total_steps);
                    pb_guard.set_position(0);
                    pb_guard.set_style(bar_style());
                }
                Progress::TaskIncrement => {
                    pb_guard.inc(1);
                }
                Progress::TaskFinish => {
                    let length = pb_guard.length().unwrap_or(0);
                    if pb_guard.position() < length {
                        pb_guard.set_position(length);
                    }
                    pb_guard.finish();
                }
                Progress::SitePlaced {
                    site_index,
                    min_clearance,
                } => {
                    let msg = match min_clearance {
                        Some(clearance) => {
                            format!("Site {} placed (clearance {:.3} Å)", site_index, clearance)
                        }
                        None => format!("Site {} placed", site_index),
                    };
                    pb_guard.set_message(msg);
                }
                Progress::Message(msg) => {
                    if !pb_guard.is_finished() {
                        pb_guard.println(format!("  {}", msg));
                    } else {
                        pb_guard.set_message(msg);
                    }
                }
            }
        })
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// One bar tick per finished ligand when docking a batch.
#[derive(Clone)]
pub struct BatchProgress {
    pb: ProgressBar,
}

impl BatchProgress {
    pub fn new(total_jobs: u64) -> Self {
        let pb = ProgressBar::new(total_jobs)
            .with_style(bar_style())
            .with_message("Docking ligands");
        pb.set_draw_target(ProgressDrawTarget::stderr());
        Self { pb }
    }

    pub fn job_finished(&self, label: &str, succeeded: bool) {
        if !succeeded {
            self.pb.println(format!("  ✗ {}", label));
        }
        self.pb.inc(1);
    }

    pub fn finish(&self) {
        self.pb.finish_with_message("✓ Done");
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} {msg}")
        .expect("Failed to create spinner style template")
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("{msg:<36} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
        .expect("Failed to create bar style template")
        .with_key(
            "eta",
            |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
            },
        )
        .progress_chars("##-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn handler_initializes_in_a_clean_state() {
        let handler = CliProgressHandler::new();
        let pb = handler.pb.lock().unwrap();
        assert_eq!(pb.length(), Some(0));
        assert!(pb.is_finished());
    }

    #[test]
    fn callback_tracks_a_docking_run() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();

        callback(Progress::PhaseStart { name: "Docking" });
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.message(), "Docking");
            assert!(!pb.is_finished());
        }

        callback(Progress::TaskStart { total_steps: 3 });
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.length(), Some(3));
            assert_eq!(pb.position(), 0);
        }

        callback(Progress::SitePlaced {
            site_index: 0,
            min_clearance: Some(2.5),
        });
        callback(Progress::TaskIncrement);
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.position(), 1);
            assert_eq!(pb.message(), "Site 0 placed (clearance 2.500 Å)");
        }

        callback(Progress::TaskFinish);
        {
            let pb = handler.pb.lock().unwrap();
            assert!(pb.is_finished());
            assert_eq!(pb.position(), 3);
        }

        callback(Progress::PhaseFinish);
        assert_eq!(handler.pb.lock().unwrap().message(), "✓ Done");
    }

    #[test]
    fn single_atom_cluster_message_omits_clearance() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();
        callback(Progress::SitePlaced {
            site_index: 4,
            min_clearance: None,
        });
        assert_eq!(handler.pb.lock().unwrap().message(), "Site 4 placed");
    }

    #[test]
    fn callback_is_thread_safe() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();

        thread::spawn(move || {
            callback(Progress::PhaseStart { name: "Docking" });
            callback(Progress::TaskIncrement);
            callback(Progress::PhaseFinish);
        })
        .join()
        .unwrap();

        let pb = handler.pb.lock().unwrap();
        assert!(pb.is_finished());
        assert_eq!(pb.message(), "✓ Done");
    }

    #[test]
    fn batch_progress_counts_jobs() {
        let batch = BatchProgress::new(2);
        batch.job_finished("a.xyz", true);
        batch.job_finished("b.xyz", false);
        assert_eq!(batch.pb.position(), 2);
        batch.finish();
        assert!(batch.pb.is_finished());
    }
}
