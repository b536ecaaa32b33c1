/// Events emitted while a docking run advances.
///
/// A run reports one phase, a task sized to the number of sites, one
/// increment per committed site and a [`Progress::SitePlaced`] summary for
/// each of them. A [`Progress::Message`] notes a site that had to be placed
/// along the +Z fallback direction.
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    TaskStart { total_steps: u64 },
    TaskIncrement,
    TaskFinish,

    SitePlaced {
        site_index: usize,
        min_clearance: Option<f64>,
    },

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    /// A reporter that discards every event.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}
