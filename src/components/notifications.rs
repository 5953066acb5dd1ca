//! Toast notifications shown over the page.

use std::time::Duration;

use leptos::prelude::*;

use crate::graph::{Notifier, NotifyLevel};

const TOAST_LIFETIME: Duration = Duration::from_millis(3000);

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
	pub id: u64,
	pub message: String,
	pub level: NotifyLevel,
}

/// Handle to the page's toast list. Cheap to copy into event handlers.
#[derive(Clone, Copy)]
pub struct Notifications {
	toasts: RwSignal<Vec<Toast>>,
	next_id: StoredValue<u64>,
}

impl Notifications {
	pub fn new() -> Self {
		Self {
			toasts: RwSignal::new(Vec::new()),
			next_id: StoredValue::new(0),
		}
	}

	pub fn push(&self, message: impl Into<String>, level: NotifyLevel) {
		let id = self.next_id.get_value();
		self.next_id.set_value(id + 1);
		self.toasts.update(|list| {
			list.push(Toast {
				id,
				message: message.into(),
				level,
			})
		});

		let toasts = self.toasts;
		set_timeout(
			move || {
				toasts.try_update(|list| list.retain(|t| t.id != id));
			},
			TOAST_LIFETIME,
		);
	}

	pub fn dismiss(&self, id: u64) {
		self.toasts.update(|list| list.retain(|t| t.id != id));
	}
}

impl Notifier for Notifications {
	fn notify(&self, message: &str, level: NotifyLevel) {
		self.push(message, level);
	}
}

/// Creates the page-wide toast list and makes it available as context.
pub fn provide_notifications() -> Notifications {
	let notifications = Notifications::new();
	provide_context(notifications);
	notifications
}

pub fn use_notifications() -> Notifications {
	use_context::<Notifications>().unwrap_or_else(provide_notifications)
}

#[component]
pub fn NotificationTray() -> impl IntoView {
	let notifications = use_notifications();

	view! {
		<div class="notification-tray">
			{move || {
				notifications
					.toasts
					.get()
					.into_iter()
					.map(|toast| {
						let id = toast.id;
						view! {
							<div class=format!("notification {} show", toast.level.as_str())>
								<div class="notification-content">
									<span>{toast.message}</span>
									<button
										class="notification-close"
										on:click=move |_| notifications.dismiss(id)
									>
										"×"
									</button>
								</div>
							</div>
						}
					})
					.collect_view()
			}}
		</div>
	}
}
