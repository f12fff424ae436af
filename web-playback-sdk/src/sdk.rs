//! WebPlaybackSdk - composite provider and main entry point
//!
//! Nests the readiness signal, the player lifecycle manager and the three
//! mirrors, and hands out the [`Scope`] the hooks read from.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing::{debug, info};
use web_playback_api::{PlayerFactory, ScriptId, SdkHost, WEB_PLAYBACK_SDK_URL};
use web_playback_state::{
    DeviceStateProvider, ErrorStateProvider, PlaybackStateProvider, PlayerProvider,
    ReadinessProvider, Scope,
};

use crate::config::WebPlaybackSdkProps;
use crate::error::Result;

/// Providers of one mounted tree, rendered top-down
struct ProviderTree {
    props: WebPlaybackSdkProps,
    readiness: ReadinessProvider,
    player: PlayerProvider,
    device: DeviceStateProvider,
    playback: PlaybackStateProvider,
    errors: ErrorStateProvider,
    mounted: bool,
}

impl ProviderTree {
    fn render(&mut self) {
        if !self.mounted {
            return;
        }

        let ready = self.readiness.is_ready();
        self.player.set_rename_delay(self.props.device_name_debounce);
        self.player.render(ready, &self.props.player_config());

        let handle = self.player.handle();
        self.device.render(handle.as_ref());
        self.playback.render(handle.as_ref(), &self.props.polling());
        self.errors.render(handle.as_ref());
    }

    fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;

        // Children first, so listeners are gone before the player disconnects
        self.errors.unmount();
        self.playback.unmount();
        self.device.unmount();
        self.player.unmount();
    }
}

/// The composite provider
///
/// Mounting injects the vendor script and waits for the host to report that
/// it loaded. From then on the player exists and its state can be read
/// through the hooks with [`WebPlaybackSdk::scope`].
///
/// # Example
///
/// ```rust,ignore
/// use web_playback_sdk::{use_playback_state, WebPlaybackSdk, WebPlaybackSdkProps};
///
/// let props = WebPlaybackSdkProps::new("My Web Player", get_oauth_token).with_volume(0.5);
/// let sdk = WebPlaybackSdk::mount(host, props)?;
///
/// // Later, once the SDK is ready and playback started:
/// if let Some(state) = use_playback_state(sdk.scope())? {
///     println!("{} / {} ms", state.position, state.duration);
/// }
/// ```
pub struct WebPlaybackSdk {
    host: Arc<dyn SdkHost>,
    script: Option<ScriptId>,
    tree: Arc<Mutex<ProviderTree>>,
    scope: Scope,
}

impl WebPlaybackSdk {
    /// Mount the provider tree on `host`
    ///
    /// Must be called inside a tokio runtime. Fails on invalid props.
    pub fn mount<H>(host: Arc<H>, props: WebPlaybackSdkProps) -> Result<Self>
    where
        H: SdkHost + PlayerFactory + 'static,
    {
        props.validate()?;

        let factory: Arc<dyn PlayerFactory> = host.clone();
        let readiness = ReadinessProvider::new();
        let player = PlayerProvider::new(factory, &props.player_config())?
            .with_rename_delay(props.device_name_debounce);
        let device = DeviceStateProvider::new();
        let playback = PlaybackStateProvider::new()?;
        let errors = ErrorStateProvider::new();

        let mut scope = Scope::new();
        readiness.provide(&mut scope);
        player.provide(&mut scope);
        device.provide(&mut scope);
        playback.provide(&mut scope);
        errors.provide(&mut scope);

        let host: Arc<dyn SdkHost> = host;
        let script = host.inject_script(WEB_PLAYBACK_SDK_URL);
        info!(device_name = %props.device_name, "Mounting Web Playback SDK");

        let tree = Arc::new(Mutex::new(ProviderTree {
            props,
            readiness: readiness.clone(),
            player,
            device,
            playback,
            errors,
            mounted: true,
        }));
        tree.lock().render();

        let weak: Weak<Mutex<ProviderTree>> = Arc::downgrade(&tree);
        readiness.listen(&*host, move || {
            if let Some(tree) = weak.upgrade() {
                tree.lock().render();
            }
        });

        Ok(Self {
            host,
            script: Some(script),
            tree,
            scope,
        })
    }

    /// Contexts the hooks read from
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Whether the vendor SDK reported that it loaded
    pub fn is_ready(&self) -> bool {
        self.tree.lock().readiness.is_ready()
    }

    pub fn props(&self) -> WebPlaybackSdkProps {
        self.tree.lock().props.clone()
    }

    /// Re-render with new props
    ///
    /// Invalid props are rejected and leave the tree untouched.
    pub fn set_props(&self, props: WebPlaybackSdkProps) -> Result<()> {
        props.validate()?;

        let mut tree = self.tree.lock();
        tree.props = props;
        tree.render();
        Ok(())
    }

    /// Tear the tree down and remove the injected script
    ///
    /// Safe to call more than once; dropping the provider does the same.
    pub fn unmount(&mut self) {
        self.tree.lock().unmount();

        if let Some(script) = self.script.take() {
            debug!("Removing Web Playback SDK script");
            self.host.remove_script(script);
            info!("Unmounted Web Playback SDK");
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.script.is_some()
    }
}

impl Drop for WebPlaybackSdk {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl std::fmt::Debug for WebPlaybackSdk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebPlaybackSdk")
            .field("script", &self.script)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}
