//! Background cookie refresh.

use std::sync::Weak;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::session::Inner;

/// Owned handle to the refresh loop. Dropping it cancels the loop.
#[derive(Debug)]
pub(crate) struct RefreshTask {
	handle: JoinHandle<()>,
}

impl RefreshTask {
	/// Starts refreshing every `period / 2`. A zero period schedules nothing.
	pub(crate) fn spawn(inner: Weak<Inner>, period: Duration) -> Option<Self> {
		if period.is_zero() {
			return None;
		}
		Some(Self { handle: tokio::spawn(run(inner, period)) })
	}

	pub(crate) fn is_active(&self) -> bool {
		!self.handle.is_finished()
	}
}

impl Drop for RefreshTask {
	fn drop(&mut self) {
		self.handle.abort();
	}
}

/// Sleeps half a period, refreshes, and re-arms with the newly granted
/// period. Ends when the session is dropped or a refresh fails.
async fn run(inner: Weak<Inner>, mut period: Duration) {
	loop {
		tokio::time::sleep(period / 2).await;

		let Some(session) = inner.upgrade() else {
			return;
		};
		if let Err(e) = session.refresh().await {
			tracing::warn!(error = %e, "Background session refresh failed; cookie will expire");
			return;
		}
		match session.refresh_period() {
			Some(next) if !next.is_zero() => period = next,
			_ => return,
		}
	}
}
