//! Interactive globe scene controller.
//!
//! [`GlobeScene`] owns hover/selection state and turns every transition into
//! calls on a [`GlobeCapability`], a [`runtime::TimerScheduler`] and a
//! [`DossierSink`]. [`SceneDriver`] adds the async boundary loading on top.

pub mod camera;
pub mod capability;
pub mod clock;
pub mod config;
pub mod controller;
pub mod dossier;
pub mod driver;
pub mod layout;

#[cfg(test)]
pub(crate) mod testing;

pub use camera::*;
pub use capability::*;
pub use clock::*;
pub use config::*;
pub use controller::*;
pub use dossier::*;
pub use driver::*;
pub use layout::*;
