// Adapters layer: concrete implementations of the domain ports for external systems
// (pick list CSV, artwork directory, image headers, RIP controller).

pub mod artwork;
pub mod image_probe;
pub mod pick_csv;
pub mod rip;

pub use artwork::ArtworkDirectory;
pub use image_probe::HeaderProbe;
pub use rip::RipClient;
