use std::time::Duration;

use leptos::prelude::*;

use super::factory_graph::GraphError;
use crate::config::NOTICE_TTL_MS;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
	Info,
	Warning,
	Error,
}

impl NoticeLevel {
	pub fn for_error(err: &GraphError) -> Self {
		match err {
			e if e.is_boundary() => NoticeLevel::Info,
			GraphError::AssetAlreadyUsed(_)
			| GraphError::EdgeNotFound(_)
			| GraphError::EndpointMissing(_)
			| GraphError::NodeNotFound(_) => NoticeLevel::Warning,
			_ => NoticeLevel::Error,
		}
	}

	fn class(self) -> &'static str {
		match self {
			NoticeLevel::Info => "notice notice-info",
			NoticeLevel::Warning => "notice notice-warning",
			NoticeLevel::Error => "notice notice-error",
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
	pub id: u64,
	pub level: NoticeLevel,
	pub text: String,
}

/// Queue of visible notices, newest last.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NoticeQueue {
	items: Vec<Notice>,
	next_id: u64,
}

impl NoticeQueue {
	const MAX_VISIBLE: usize = 4;

	pub fn push(&mut self, level: NoticeLevel, text: String) -> u64 {
		let id = self.next_id;
		self.next_id += 1;
		self.items.push(Notice { id, level, text });
		if self.items.len() > Self::MAX_VISIBLE {
			self.items.remove(0);
		}
		id
	}

	pub fn dismiss(&mut self, id: u64) {
		self.items.retain(|n| n.id != id);
	}

	pub fn items(&self) -> &[Notice] {
		&self.items
	}
}

/// Shared handle to the notice queue.
#[derive(Clone, Copy)]
pub struct Notices(RwSignal<NoticeQueue>);

impl Default for Notices {
	fn default() -> Self {
		Self(RwSignal::new(NoticeQueue::default()))
	}
}

impl Notices {
	/// Shows a notice and schedules its removal.
	pub fn push(&self, level: NoticeLevel, text: impl Into<String>) {
		let Some(id) = self.0.try_update(|q| q.push(level, text.into())) else {
			return;
		};
		let queue = self.0;
		set_timeout(
			move || {
				queue.try_update(|q| q.dismiss(id));
			},
			Duration::from_millis(NOTICE_TTL_MS),
		);
	}

	pub fn report(&self, err: &GraphError) {
		self.push(NoticeLevel::for_error(err), err.to_string());
	}

	pub fn dismiss(&self, id: u64) {
		self.0.update(|q| q.dismiss(id));
	}

	pub fn items(&self) -> Vec<Notice> {
		self.0.with(|q| q.items().to_vec())
	}
}

#[component]
pub fn NoticeStack() -> impl IntoView {
	let notices = expect_context::<Notices>();

	view! {
		<div class="notice-stack" role="status">
			{move || {
				notices
					.items()
					.into_iter()
					.map(|notice| {
						let id = notice.id;
						view! {
							<div class=notice.level.class() on:click=move |_| notices.dismiss(id)>
								<span>{notice.text}</span>
								<button class="notice-close" title="Dismiss">"×"</button>
							</div>
						}
					})
					.collect_view()
			}}
		</div>
	}
}
