use std::{sync::Arc, time::Duration};

use eyre::Result;
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, Instrument};

use crate::{
    api::AssetApi,
    controller::{GalleryController, PageInputs, RenderOutcome},
    render::RenderTarget,
};

#[derive(Debug)]
enum SearchMsg {
    InputChanged,
}

/// Debounces search box edits. Each edit drops the render that is waiting or in flight and
/// schedules a new one, so an older fetch can never overwrite a newer result.
#[derive(Clone)]
pub struct SearchHandle {
    send: mpsc::UnboundedSender<SearchMsg>,
}

impl SearchHandle {
    /// The actor stops after every handle is dropped, finishing the last scheduled render.
    pub fn new<A, R, P>(
        controller: Arc<GalleryController<A, R, P>>,
        debounce: Duration,
    ) -> (SearchHandle, JoinHandle<Option<RenderOutcome>>)
    where
        A: AssetApi + 'static,
        R: RenderTarget + 'static,
        P: PageInputs + 'static,
    {
        let (send, recv) = mpsc::unbounded_channel();
        let join = tokio::spawn(
            run_search(recv, controller, debounce).instrument(tracing::info_span!("search")),
        );
        (SearchHandle { send }, join)
    }

    pub fn input_changed(&self) -> Result<()> {
        self.send.send(SearchMsg::InputChanged)?;
        Ok(())
    }
}

/// Returns the outcome of the last render that ran to completion.
async fn run_search<A, R, P>(
    mut recv: mpsc::UnboundedReceiver<SearchMsg>,
    controller: Arc<GalleryController<A, R, P>>,
    debounce: Duration,
) -> Option<RenderOutcome>
where
    A: AssetApi,
    R: RenderTarget,
    P: PageInputs,
{
    let mut last_outcome = None;
    'idle: while let Some(SearchMsg::InputChanged) = recv.recv().await {
        loop {
            let render = async {
                tokio::time::sleep(debounce).await;
                controller.refresh().await
            };
            tokio::pin!(render);
            tokio::select! {
                biased;
                outcome = &mut render => {
                    last_outcome = Some(outcome);
                    continue 'idle;
                }
                msg = recv.recv() => match msg {
                    Some(SearchMsg::InputChanged) => {
                        debug!("search input changed, dropping pending render");
                        continue;
                    }
                    None => {
                        last_outcome = Some(render.await);
                        break 'idle;
                    }
                },
            }
        }
    }
    last_outcome
}
