//! Framework adapters
//!
//! An adapter rewrites raw component code into a script that boots the
//! framework inside a preview document. Adapters never fail: code they cannot
//! make sense of still yields a script, which at worst renders nothing.

use super::UiFramework;
use crate::config::PreviewAssets;

pub mod react;
pub mod vue;

pub use react::ReactAdapter;
pub use vue::VueAdapter;

/// Framework-specific code adaptation for live previews
pub trait FrameworkAdapter: Send + Sync {
    fn framework(&self) -> UiFramework;

    /// Id of the element the bootstrap script mounts into
    fn mount_id(&self) -> &'static str;

    /// `type` attribute of the bootstrap script tag, if it needs one
    fn script_type(&self) -> Option<&'static str> {
        None
    }

    /// Runtime scripts loaded in the document head, in load order
    fn runtime_scripts<'a>(&self, assets: &'a PreviewAssets) -> Vec<&'a str>;

    /// Rewrites raw code into the bootstrap script body
    fn adapt(&self, code: &str) -> String;
}

/// Adapter for a UI framework; `None` for plain HTML
pub fn adapter_for(framework: UiFramework) -> Option<&'static dyn FrameworkAdapter> {
    match framework {
        UiFramework::None => None,
        UiFramework::React => Some(&ReactAdapter),
        UiFramework::Vue => Some(&VueAdapter),
    }
}
