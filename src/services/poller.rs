// src/services/poller.rs

//! Polling periódico com no máximo uma busca em andamento.
//!
//! A cada tick, se a busca anterior ainda não terminou ela é abortada (e
//! aguardada) antes de a próxima começar. Ticks perdidos são pulados. O
//! último valor bom fica num canal `watch`; erro só gera log e mantém o
//! valor anterior. Soltar o [`PollHandle`] encerra o loop e a busca em curso.

use std::{fmt::Display, future::Future, time::Duration};

use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};

// Aborta a task quando sai de escopo
struct AbortOnDrop(JoinHandle<()>);

impl AbortOnDrop {
    async fn cancel(mut self) {
        self.0.abort();
        // Espera a task sair de fato; o resultado (Cancelled) não interessa
        let _ = (&mut self.0).await;
    }
}

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

pub struct PollHandle<T> {
    latest: watch::Receiver<Option<T>>,
    _task: AbortOnDrop,
}

impl<T> PollHandle<T> {
    /// Receptor do último valor publicado (`None` até a primeira busca ok).
    pub fn subscribe(&self) -> watch::Receiver<Option<T>> {
        self.latest.clone()
    }
}

pub fn spawn_poller<T, E, F, Fut>(period: Duration, mut fetch: F) -> PollHandle<T>
where
    T: Send + Sync + 'static,
    E: Display + Send + 'static,
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
{
    let (tx, rx) = watch::channel(None);

    let task = tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut in_flight: Option<AbortOnDrop> = None;

        loop {
            ticker.tick().await;

            if let Some(previous) = in_flight.take() {
                if !previous.0.is_finished() {
                    tracing::debug!("Busca anterior ainda em andamento; abortando");
                }
                previous.cancel().await;
            }

            let tx = tx.clone();
            let request = fetch();
            in_flight = Some(AbortOnDrop(tokio::spawn(async move {
                match request.await {
                    Ok(value) => {
                        tx.send_replace(Some(value));
                    }
                    Err(e) => tracing::warn!("Falha no polling do painel: {}", e),
                }
            })));
        }
    });

    PollHandle { latest: rx, _task: AbortOnDrop(task) }
}
