use iced::executor;
use tokio::runtime::Runtime;

/// Runs the app's futures on a tokio runtime so reqwest works under iced.
#[derive(Debug)]
pub struct TokioExecutor {
    runtime: Runtime,
}

impl executor::Executor for TokioExecutor {
    fn new() -> Result<Self, std::io::Error> {
        Ok(Self {
            runtime: Runtime::new()?,
        })
    }

    fn spawn(&self, future: impl std::future::Future<Output = ()> + Send + 'static) {
        self.runtime.spawn(future);
    }
}
