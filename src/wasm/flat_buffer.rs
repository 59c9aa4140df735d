//! Flat buffer protocol for zero-copy WASM bridge
//!
//! Binary format for a layout plan:
//!
//! ## u32 Buffer Layout:
//! ```text
//! Header:
//! [0]     MAGIC (0x43464C57 = "CFLW" for validation)
//! [1]     SCHEMA_VERSION (protocol version, currently 1)
//! [2]     page_count
//! [3]     frame_count
//! [4]     item_count
//! [5]     warning_count
//! [6]     text_buffer_len
//! [7]     u32_item_offset (index in u32_data where item records start, 0 if none)
//! [8..]   frame data...
//!
//! Per-frame:
//!   [id_lo, id_hi, item, chain_index, page, column, flags, name_offset, name_len]
//!     flags: bit0=title, bit1=linked, bit2=orphaned, bit3=reclaimed
//!     name_offset/name_len: byte offsets in text_data (UTF-8)
//!
//! At u32_item_offset (item_count times):
//!   [status, first_frame, frame_count, flags]
//!     status: STATUS_* opcode
//!     first_frame: index of the item's first frame, u32::MAX if it has none
//!     flags: bit0=title, bit1=overflowing
//! ```
//!
//! ## f32 Buffer Layout:
//! ```text
//! Per-frame: [x, y, width, height]
//! ```

use crate::layout::{ItemRecord, ItemStatus, LayoutPlan, PlacedFrame};

/// Magic number for format validation: "CFLW" (ColFLoW)
pub const MAGIC: u32 = 0x43464C57;

/// Schema version for protocol compatibility checking
pub const SCHEMA_VERSION: u32 = 1;

/// Header size in u32 elements
pub const HEADER_SIZE: usize = 8;

/// Opcodes for item status
pub const STATUS_COMPLETE: u32 = 0;
pub const STATUS_TRUNCATED: u32 = 1;
pub const STATUS_SKIPPED: u32 = 2;
pub const STATUS_CAP_REACHED: u32 = 3;

/// Frame flags bitmask
pub const FLAG_TITLE: u32 = 0b0001;
pub const FLAG_LINKED: u32 = 0b0010;
pub const FLAG_ORPHANED: u32 = 0b0100;
pub const FLAG_RECLAIMED: u32 = 0b1000;

/// Item flags bitmask
pub const ITEM_FLAG_TITLE: u32 = 0b0001;
pub const ITEM_FLAG_OVERFLOWING: u32 = 0b0010;

/// Number of u32 values per frame
pub const U32_PER_FRAME: usize = 9;

/// Number of f32 values per frame: x, y, width, height
pub const F32_PER_FRAME: usize = 4;

/// Number of u32 values per item record
pub const U32_PER_ITEM: usize = 4;

/// Pending item record (written to buffers in finalize())
struct PendingItem {
    status: u32,
    first_frame: u32,
    frame_count: u32,
    flags: u32,
}

/// Plan buffer for zero-copy WASM transfer
pub struct PlanBuffer {
    /// Integer data (ids, indices, counts, offsets, opcodes)
    pub u32_data: Vec<u32>,
    /// Float data (frame geometry)
    pub f32_data: Vec<f32>,
    /// UTF-8 frame names
    pub text_data: Vec<u8>,

    // Items are written after every frame so their offset is known
    pending_items: Vec<PendingItem>,
}

impl Default for PlanBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanBuffer {
    pub fn new() -> Self {
        Self {
            u32_data: Vec::with_capacity(256),
            f32_data: Vec::with_capacity(128),
            text_data: Vec::with_capacity(1024),
            pending_items: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.u32_data.clear();
        self.f32_data.clear();
        self.text_data.clear();
        self.pending_items.clear();
    }

    /// Pre-allocate buffers so JS-held pointers stay valid while writing.
    ///
    /// - u32_needed: HEADER_SIZE + frames * U32_PER_FRAME + items * U32_PER_ITEM
    /// - f32_needed: frames * F32_PER_FRAME
    /// - text_needed: sum of frame name bytes
    pub fn prepare(&mut self, u32_needed: usize, f32_needed: usize, text_needed: usize) {
        let u32_target = u32_needed + 32;
        let f32_target = f32_needed + 32;
        let text_target = text_needed + 256;

        // Reuse buffers if capacity is sufficient
        if self.u32_data.capacity() < u32_target {
            self.u32_data = Vec::with_capacity(u32_target);
        } else {
            self.u32_data.clear();
        }

        if self.f32_data.capacity() < f32_target {
            self.f32_data = Vec::with_capacity(f32_target);
        } else {
            self.f32_data.clear();
        }

        if self.text_data.capacity() < text_target {
            self.text_data = Vec::with_capacity(text_target);
        } else {
            self.text_data.clear();
        }

        self.pending_items.clear();
    }

    /// Write header; counts that depend on later writes are filled in by finalize()
    pub fn write_header(&mut self, page_count: u32, warning_count: u32) {
        self.u32_data.push(MAGIC); // [0] magic number
        self.u32_data.push(SCHEMA_VERSION); // [1] schema version
        self.u32_data.push(page_count); // [2] page_count
        self.u32_data.push(0); // [3] frame_count (placeholder)
        self.u32_data.push(0); // [4] item_count (placeholder)
        self.u32_data.push(warning_count); // [5] warning_count
        self.u32_data.push(0); // [6] text_buffer_len (placeholder)
        self.u32_data.push(0); // [7] u32_item_offset (placeholder)
    }

    /// Write one frame record
    pub fn write_frame(&mut self, frame: &PlacedFrame) {
        let name_offset = self.text_data.len() as u32;
        self.text_data.extend_from_slice(frame.name.as_bytes());

        let mut flags = 0;
        if frame.kind.is_title() {
            flags |= FLAG_TITLE;
        }
        if frame.linked_from.is_some() {
            flags |= FLAG_LINKED;
        }
        if frame.orphaned {
            flags |= FLAG_ORPHANED;
        }
        if frame.reclaimed {
            flags |= FLAG_RECLAIMED;
        }

        self.u32_data.push((frame.id.0 & 0xFFFFFFFF) as u32);
        self.u32_data.push((frame.id.0 >> 32) as u32);
        self.u32_data.push(frame.item as u32);
        self.u32_data.push(frame.chain_index as u32);
        self.u32_data.push(frame.page);
        self.u32_data.push(frame.column as u32);
        self.u32_data.push(flags);
        self.u32_data.push(name_offset);
        self.u32_data.push(frame.name.len() as u32);

        self.f32_data.push(frame.rect.x);
        self.f32_data.push(frame.rect.y);
        self.f32_data.push(frame.rect.width);
        self.f32_data.push(frame.rect.height);
    }

    /// Queue an item record (written to buffers in finalize())
    pub fn write_item(&mut self, item: &ItemRecord) {
        let mut flags = 0;
        if item.kind.is_title() {
            flags |= ITEM_FLAG_TITLE;
        }
        if item.overflowing {
            flags |= ITEM_FLAG_OVERFLOWING;
        }

        self.pending_items.push(PendingItem {
            status: status_to_opcode(item.status),
            first_frame: item.frames.first().map_or(u32::MAX, |&i| i as u32),
            frame_count: item.frames.len() as u32,
            flags,
        });
    }

    /// Write pending items and synchronize header counts.
    /// Must be called after every frame has been written.
    pub fn finalize(&mut self) {
        if self.u32_data.len() < HEADER_SIZE {
            return;
        }

        self.u32_data[3] = ((self.u32_data.len() - HEADER_SIZE) / U32_PER_FRAME) as u32;

        if self.pending_items.is_empty() {
            self.u32_data[7] = 0;
        } else {
            self.u32_data[7] = self.u32_data.len() as u32;
            for item in &self.pending_items {
                self.u32_data.push(item.status);
                self.u32_data.push(item.first_frame);
                self.u32_data.push(item.frame_count);
                self.u32_data.push(item.flags);
            }
        }
        self.u32_data[4] = self.pending_items.len() as u32;
        self.u32_data[6] = self.text_data.len() as u32;
    }

    /// Encode a whole plan, replacing previous contents
    pub fn encode(&mut self, plan: &LayoutPlan) {
        let u32_needed =
            HEADER_SIZE + plan.frames.len() * U32_PER_FRAME + plan.items.len() * U32_PER_ITEM;
        let f32_needed = plan.frames.len() * F32_PER_FRAME;
        let text_needed = plan.frames.iter().map(|f| f.name.len()).sum();
        self.prepare(u32_needed, f32_needed, text_needed);

        self.write_header(plan.pages, plan.warnings.len() as u32);
        for frame in &plan.frames {
            self.write_frame(frame);
        }
        for item in &plan.items {
            self.write_item(item);
        }
        self.finalize();
    }

    // Accessors for WASM
    // Return u32 instead of usize for explicit WASM contract (wasm32 linear memory uses u32 offsets)

    pub fn u32_ptr(&self) -> u32 {
        self.u32_data.as_ptr() as u32
    }

    pub fn u32_len(&self) -> u32 {
        self.u32_data.len() as u32
    }

    pub fn f32_ptr(&self) -> u32 {
        self.f32_data.as_ptr() as u32
    }

    pub fn f32_len(&self) -> u32 {
        self.f32_data.len() as u32
    }

    pub fn text_ptr(&self) -> u32 {
        self.text_data.as_ptr() as u32
    }

    pub fn text_len(&self) -> u32 {
        self.text_data.len() as u32
    }
}

/// Convert an item status to its opcode
pub fn status_to_opcode(status: ItemStatus) -> u32 {
    match status {
        ItemStatus::Complete => STATUS_COMPLETE,
        ItemStatus::Truncated => STATUS_TRUNCATED,
        ItemStatus::Skipped => STATUS_SKIPPED,
        ItemStatus::CapReached => STATUS_CAP_REACHED,
    }
}
