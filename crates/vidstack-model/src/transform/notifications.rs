//! Notification settings transformer, including the nested `events` flags.

use crate::entity::{NotificationEvents, Notifications};
use crate::error::MalformedResponse;
use crate::transform::{Fields, Transformer, WireWriter};
use crate::types::EntityKind;
use crate::wire::{WireRecord, WireValue};

const EVENT_FLAGS: [&str; 4] = [
    "video_created",
    "video_encoded",
    "encoding_progress",
    "encoding_completed",
];

/// Transformer for [`Notifications`] records.
///
/// `url` is always emitted: the service only clears the callback URL when it
/// receives an explicit empty value, so an unset URL is written as `""` and an
/// empty URL is read back as unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotificationsTransformer;

impl Transformer for NotificationsTransformer {
    type Entity = Notifications;

    fn kind(&self) -> EntityKind {
        EntityKind::Notifications
    }

    fn from_wire(&self, record: &WireRecord) -> Result<Notifications, MalformedResponse> {
        let mut f = Fields::new(EntityKind::Notifications, record);
        let url = f.string("url")?.filter(|u| !u.is_empty());
        let delay = f.unsigned("delay")?;

        let mut events = Fields::new(EntityKind::Notifications, &f.required_record("events")?);
        let mut flag = |name: &str| events.boolean(name).map(Option::unwrap_or_default);
        let video_created = flag(EVENT_FLAGS[0])?;
        let video_encoded = flag(EVENT_FLAGS[1])?;
        let encoding_progress = flag(EVENT_FLAGS[2])?;
        let encoding_completed = flag(EVENT_FLAGS[3])?;

        Ok(Notifications {
            url,
            delay,
            events: NotificationEvents {
                video_created,
                video_encoded,
                encoding_progress,
                encoding_completed,
                extra: events.finish(),
            },
            extra: f.finish(),
        })
    }

    fn to_wire(&self, notifications: &Notifications) -> WireRecord {
        let events = &notifications.events;
        let mut flags = WireWriter::new(&events.extra);
        flags
            .put(EVENT_FLAGS[0], events.video_created)
            .put(EVENT_FLAGS[1], events.video_encoded)
            .put(EVENT_FLAGS[2], events.encoding_progress)
            .put(EVENT_FLAGS[3], events.encoding_completed);

        let mut w = WireWriter::new(&notifications.extra);
        w.put("url", notifications.url.clone().unwrap_or_default())
            .put_opt("delay", notifications.delay)
            .put("events", WireValue::Record(flags.finish()));
        w.finish()
    }

    fn read_only_fields(&self) -> &'static [&'static str] {
        &[]
    }
}
