//! Lookup of the transformer for each entity kind.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::entity::{CloudInfo, Encoding, Notifications, Profile, Video};
use crate::transform::{
    CloudTransformer, EncodingTransformer, NotificationsTransformer, ProfileTransformer,
    Transformer, VideoTransformer,
};
use crate::types::EntityKind;

type Slot<E> = Arc<dyn Transformer<Entity = E>>;

mod sealed {
    pub trait Sealed {}
}

/// An entity type with a slot in the [`TransformerRegistry`].
///
/// Implemented for the five service entities only, so a lookup for a kind
/// without a transformer does not compile.
pub trait Entity: sealed::Sealed + Sized + Send + Sync + 'static {
    /// Kind of the entity.
    const KIND: EntityKind;

    #[doc(hidden)]
    fn slot(registry: &TransformerRegistry) -> &Slot<Self>;

    #[doc(hidden)]
    fn slot_mut(registry: &mut TransformerRegistry) -> &mut Slot<Self>;
}

macro_rules! entity_slot {
    ($entity:ty, $kind:ident, $field:ident) => {
        impl sealed::Sealed for $entity {}

        impl Entity for $entity {
            const KIND: EntityKind = EntityKind::$kind;

            fn slot(registry: &TransformerRegistry) -> &Slot<Self> {
                &registry.$field
            }

            fn slot_mut(registry: &mut TransformerRegistry) -> &mut Slot<Self> {
                &mut registry.$field
            }
        }
    };
}

entity_slot!(CloudInfo, Cloud, cloud);
entity_slot!(Encoding, Encoding, encoding);
entity_slot!(Notifications, Notifications, notifications);
entity_slot!(Profile, Profile, profile);
entity_slot!(Video, Video, video);

/// One transformer per entity kind.
///
/// [`TransformerRegistry::default`] holds the built-in transformers; any of
/// them can be replaced with [`TransformerRegistry::register`].
///
/// # Examples
///
/// ```
/// use vidstack_model::{EntityKind, TransformerRegistry, Video};
///
/// let registry = TransformerRegistry::default();
/// assert_eq!(registry.get::<Video>().kind(), EntityKind::Video);
/// ```
#[derive(Debug, Clone)]
pub struct TransformerRegistry {
    cloud: Slot<CloudInfo>,
    encoding: Slot<Encoding>,
    notifications: Slot<Notifications>,
    profile: Slot<Profile>,
    video: Slot<Video>,
}

impl Default for TransformerRegistry {
    fn default() -> Self {
        Self {
            cloud: Arc::new(CloudTransformer),
            encoding: Arc::new(EncodingTransformer),
            notifications: Arc::new(NotificationsTransformer),
            profile: Arc::new(ProfileTransformer),
            video: Arc::new(VideoTransformer),
        }
    }
}

impl TransformerRegistry {
    /// Replace the transformer for `E`, returning the previous one.
    pub fn register<E: Entity>(
        &mut self,
        transformer: Arc<dyn Transformer<Entity = E>>,
    ) -> Arc<dyn Transformer<Entity = E>> {
        if transformer.kind() != E::KIND {
            warn!(
                expected = %E::KIND,
                reported = %transformer.kind(),
                "transformer reports a different kind than its slot"
            );
        }
        debug!(kind = %E::KIND, ?transformer, "registering transformer");
        std::mem::replace(E::slot_mut(self), transformer)
    }

    /// Builder-style [`TransformerRegistry::register`].
    #[must_use]
    pub fn with<E: Entity>(mut self, transformer: Arc<dyn Transformer<Entity = E>>) -> Self {
        self.register(transformer);
        self
    }

    /// The transformer for `E`.
    #[must_use]
    pub fn get<E: Entity>(&self) -> &dyn Transformer<Entity = E> {
        E::slot(self).as_ref()
    }

    /// Every kind with a registered transformer.
    #[must_use]
    pub fn kinds(&self) -> [EntityKind; 5] {
        EntityKind::ALL
    }
}
