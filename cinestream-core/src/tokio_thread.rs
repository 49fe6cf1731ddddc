use std::pin::Pin;

type Task = Pin<Box<dyn Future<Output = ()> + Send>>;

/// A tokio runtime driven from its own thread, so the UI thread never blocks on I/O.
pub struct TokioThread {
    tasks: tokio::sync::mpsc::Sender<Task>,
    _thread_handle: std::thread::JoinHandle<()>,
}
impl TokioThread {
    pub fn new() -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;
        let (tasks, mut task_rx) = tokio::sync::mpsc::channel::<Task>(16);

        let thread_handle = std::thread::Builder::new()
            .name("cinestream-tokio".to_string())
            .spawn(move || {
                runtime.block_on(async {
                    while let Some(task) = task_rx.recv().await {
                        tokio::spawn(task);
                    }
                });
            })?;

        Ok(Self {
            tasks,
            _thread_handle: thread_handle,
        })
    }

    pub fn spawn(&self, task: impl Future<Output = ()> + Send + 'static) {
        if self.tasks.blocking_send(Box::pin(task)).is_err() {
            tracing::error!("background runtime has shut down, dropping task");
        }
    }
}
