//! Program image loading.
//!
//! Reading an image from disk is the shell's business; this module only deposits raw
//! bytes into a memory module before the first clock.

use tracing::{debug, warn};

use crate::soc::memory::MemoryModule;

/// Writes `image` into `module` starting at address 0.
///
/// # Returns
///
/// `false` (module untouched) if the image is empty or does not fit under the
/// module's block range rule.
pub fn load_image(module: &mut dyn MemoryModule, image: &[u8]) -> bool {
    load_image_at(module, 0, image)
}

/// Writes `image` into `module` starting at `address`.
pub fn load_image_at(module: &mut dyn MemoryModule, address: usize, image: &[u8]) -> bool {
    let loaded = module.set_block(address, image);
    if loaded {
        debug!(address, bytes = image.len(), "image loaded");
    } else {
        warn!(
            address,
            bytes = image.len(),
            capacity = module.capacity(),
            "image does not fit"
        );
    }
    loaded
}
