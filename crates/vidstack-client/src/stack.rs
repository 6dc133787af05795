//! Composition root: validated configuration in, ready-to-use clouds out.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info};
use vidstack_auth::{HmacSigner, RequestSigner};
use vidstack_core::{AccountConfig, CloudConfig, ConfigError, DEFAULT_NAME, VidStackConfig};
use vidstack_http::{Dispatcher, DispatcherConfig, HttpDispatcher};
use vidstack_model::{Entity, Transformer, TransformerRegistry};

use crate::cloud::Cloud;
use crate::error::Result;

/// Every configured cloud, sharing one signer, dispatcher and transformer
/// registry.
#[derive(Debug, Clone)]
pub struct VidStack {
    clouds: BTreeMap<String, Cloud>,
}

impl VidStack {
    /// Start building a stack.
    #[must_use]
    pub fn builder() -> VidStackBuilder {
        VidStackBuilder::default()
    }

    /// Build a stack from `config` with the default signer and an HTTP
    /// dispatcher configured from the environment.
    pub fn from_config(config: &VidStackConfig) -> Result<Self> {
        Self::builder().config(config.clone()).build()
    }

    /// The cloud configured under `name`.
    pub fn cloud(&self, name: &str) -> Result<Cloud> {
        self.clouds.get(name).cloned().ok_or_else(|| {
            ConfigError::NotFound {
                section: "clouds",
                entry: name.to_owned(),
            }
            .into()
        })
    }

    /// The cloud named `default`.
    pub fn default_cloud(&self) -> Result<Cloud> {
        self.cloud(DEFAULT_NAME)
    }

    /// Configured cloud names, sorted.
    #[must_use]
    pub fn cloud_names(&self) -> Vec<&str> {
        self.clouds.keys().map(String::as_str).collect()
    }
}

/// Builder for [`VidStack`].
///
/// Nothing is validated until [`VidStackBuilder::build`], which either returns
/// a stack whose every cloud is usable or the first configuration error.
#[derive(Debug, Default)]
pub struct VidStackBuilder {
    config: VidStackConfig,
    signer: Option<Arc<dyn RequestSigner>>,
    dispatcher: Option<Arc<dyn Dispatcher>>,
    dispatcher_config: Option<DispatcherConfig>,
    transformers: TransformerRegistry,
}

impl VidStackBuilder {
    /// Add or replace an account.
    #[must_use]
    pub fn account(mut self, name: impl Into<String>, account: AccountConfig) -> Self {
        self.config = self.config.with_account(name, account);
        self
    }

    /// Add or replace a cloud.
    #[must_use]
    pub fn cloud(mut self, name: impl Into<String>, cloud: CloudConfig) -> Self {
        self.config = self.config.with_cloud(name, cloud);
        self
    }

    /// Merge a configuration; its entries win on name clashes.
    #[must_use]
    pub fn config(mut self, config: VidStackConfig) -> Self {
        self.config.merge(config);
        self
    }

    /// Use `signer` instead of [`HmacSigner`].
    #[must_use]
    pub fn signer(mut self, signer: Arc<dyn RequestSigner>) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Use `dispatcher` instead of building an [`HttpDispatcher`].
    #[must_use]
    pub fn dispatcher(mut self, dispatcher: Arc<dyn Dispatcher>) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    /// Settings for the default [`HttpDispatcher`]. Defaults to
    /// [`DispatcherConfig::from_env`].
    #[must_use]
    pub fn dispatcher_config(mut self, config: DispatcherConfig) -> Self {
        self.dispatcher_config = Some(config);
        self
    }

    /// Replace the transformer for entity `E`.
    #[must_use]
    pub fn transformer<E: Entity>(mut self, transformer: Arc<dyn Transformer<Entity = E>>) -> Self {
        self.transformers.register(transformer);
        self
    }

    /// Validate the configuration and build every cloud.
    pub fn build(self) -> Result<VidStack> {
        let (accounts, registry) = self.config.validate()?;
        debug!(
            accounts = accounts.len(),
            clouds = registry.len(),
            "validated configuration"
        );

        let signer: Arc<dyn RequestSigner> = self.signer.unwrap_or_else(|| Arc::new(HmacSigner));
        let dispatcher: Arc<dyn Dispatcher> = match self.dispatcher {
            Some(dispatcher) => dispatcher,
            None => {
                let config = self
                    .dispatcher_config
                    .unwrap_or_else(DispatcherConfig::from_env);
                Arc::new(HttpDispatcher::new(&config)?)
            }
        };
        let transformers = Arc::new(self.transformers);

        let mut clouds = BTreeMap::new();
        for name in registry.names() {
            let record = registry.get(name)?;
            let cloud = Cloud::new(
                name,
                record.id(),
                Arc::clone(record.account()),
                Arc::clone(&signer),
                Arc::clone(&dispatcher),
                Arc::clone(&transformers),
            );
            clouds.insert(name.to_owned(), cloud);
        }

        info!(clouds = ?clouds.keys().collect::<Vec<_>>(), "vidstack ready");
        Ok(VidStack { clouds })
    }
}

/// Build the stack described by `config` and return one cloud: `name`, or
/// `default` when `None`.
pub fn get_cloud(config: &VidStackConfig, name: Option<&str>) -> Result<Cloud> {
    VidStack::from_config(config)?.cloud(name.unwrap_or(DEFAULT_NAME))
}
