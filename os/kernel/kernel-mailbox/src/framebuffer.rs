use crate::{MailboxBuffer, MailboxChannel, NegotiationError, PropertyMessage, tags};
use kernel_info::display::{DescriptorError, FramebufferDescriptor, PixelOrder};
use kernel_info::memory::bus_to_physical;

/// The display mode to ask the firmware for.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct FramebufferRequest {
    pub width: u32,
    pub height: u32,
    /// Bits per pixel.
    pub depth: u32,
    pub pixel_order: PixelOrder,
    /// Preferred alignment of the buffer address in bytes.
    pub alignment: u32,
}

impl FramebufferRequest {
    #[must_use]
    pub const fn new(width: u32, height: u32, depth: u32, pixel_order: PixelOrder) -> Self {
        Self {
            width,
            height,
            depth,
            pixel_order,
            alignment: 4,
        }
    }

    #[must_use]
    pub const fn with_alignment(mut self, alignment: u32) -> Self {
        self.alignment = alignment;
        self
    }
}

/// Allocates a framebuffer through the property channel.
///
/// Sends, in one message: physical size, virtual size, virtual offset
/// (0, 0), depth, pixel order, buffer allocation and a pitch query. The
/// descriptor is built from the values the firmware wrote back into those
/// same tags, with the allocation address converted from the VideoCore bus
/// encoding to an ARM physical address.
///
/// # Errors
/// [`NegotiationError::Mailbox`] if the exchange failed, was not
/// acknowledged or left one of the tags unanswered, [`NegotiationError::Descriptor`] if the firmware answered
/// with an unusable buffer. No descriptor exists in either case.
pub fn negotiate_framebuffer<C: MailboxChannel + ?Sized>(
    channel: &mut C,
    request: &FramebufferRequest,
) -> Result<FramebufferDescriptor, NegotiationError> {
    let (width, height) = (request.width, request.height);

    let mut buffer = MailboxBuffer::new();
    let mut msg = PropertyMessage::new(&mut buffer);
    let physical = msg.tag(tags::SET_PHYSICAL_SIZE, &[width, height], 2)?;
    msg.tag(tags::SET_VIRTUAL_SIZE, &[width, height], 2)?;
    msg.tag(tags::SET_VIRTUAL_OFFSET, &[0, 0], 2)?;
    let depth = msg.tag(tags::SET_DEPTH, &[request.depth], 1)?;
    let order = msg.tag(tags::SET_PIXEL_ORDER, &[request.pixel_order as u32], 1)?;
    let allocation = msg.tag(tags::ALLOCATE_BUFFER, &[request.alignment], 2)?;
    let pitch = msg.tag(tags::GET_PITCH, &[], 1)?;

    let response = msg
        .submit(channel)
        .inspect_err(|e| log::error!("framebuffer negotiation failed: {e}"))?;

    let read = |slot, index| {
        response
            .answer(slot, index)
            .inspect_err(|e| log::error!("framebuffer negotiation failed: {e}"))
    };
    let raw_order = read(order, 0)?;
    let pixel_order =
        PixelOrder::from_raw(raw_order).ok_or(DescriptorError::UnknownPixelOrder(raw_order))?;

    let descriptor = FramebufferDescriptor::new(
        bus_to_physical(read(allocation, 0)?),
        read(physical, 0)?,
        read(physical, 1)?,
        read(pitch, 0)?,
        read(depth, 0)?,
        pixel_order,
        read(allocation, 1)?,
    )
    .inspect_err(|e| log::error!("framebuffer rejected: {e}"))?;

    log::info!(
        "framebuffer: {}x{} pixels, pitch {} bytes, depth {} bits, {:?}, address {:#010x}, size {} bytes",
        descriptor.width(),
        descriptor.height(),
        descriptor.pitch(),
        descriptor.depth(),
        descriptor.pixel_order(),
        descriptor.base(),
        descriptor.size(),
    );
    Ok(descriptor)
}
