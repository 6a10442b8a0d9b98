//! Power-on-latched button remapping.
//!
//! Different host games expect the nine Saturn buttons in different USB
//! button orders. The layout is chosen once, on the first successful pad
//! decode after power-up, by whichever face button the player is holding;
//! it then stays fixed for the lifetime of the process.

use crate::report::{JoystickReport, SaturnButtons};

/// Mask of the nine permutable button bits. Bits above it (directional
/// buttons from the analog pad) pass through unchanged.
const PERMUTED_MASK: u16 = 0x01FF;

/// Physical-to-logical button permutation, indexed by physical bit
/// position (A, B, C, X, Y, Z, Start, L, R).
type PermutationTable = [u8; 9];

/*                                         Saturn:  A  B  C  X  Y  Z  St L  R */
const LAYOUT_A: PermutationTable = /*          */ [ 1, 2, 5, 0, 3, 4, 9, 6, 7 ];
const LAYOUT_A_VARIANT: PermutationTable = /*  */ [ 1, 2, 5, 0, 3, 4, 8, 6, 7 ];
const LAYOUT_B: PermutationTable = /*          */ [ 0, 1, 2, 3, 4, 5, 8, 6, 7 ];

/// The selectable button layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonMapping {
    /// Default layout (Start maps above the shoulder buttons).
    LayoutA,
    /// Layout A with Start on the select position. Hold A at power-up.
    LayoutAVariant,
    /// Near-identity layout with Start relocated. Hold B at power-up.
    LayoutB,
    /// Wire order passed straight through. Hold C at power-up.
    Identity,
}

impl ButtonMapping {
    /// Pick the layout from the buttons held at selection time.
    ///
    /// Checked in fixed order, so C beats B beats A when several are held.
    #[must_use]
    fn select(held: SaturnButtons) -> Self {
        let mut mapping = ButtonMapping::LayoutA;
        if held.contains(SaturnButtons::A) {
            mapping = ButtonMapping::LayoutAVariant;
        }
        if held.contains(SaturnButtons::B) {
            mapping = ButtonMapping::LayoutB;
        }
        if held.contains(SaturnButtons::C) {
            mapping = ButtonMapping::Identity;
        }
        mapping
    }

    const fn table(self) -> Option<&'static PermutationTable> {
        match self {
            ButtonMapping::LayoutA => Some(&LAYOUT_A),
            ButtonMapping::LayoutAVariant => Some(&LAYOUT_A_VARIANT),
            ButtonMapping::LayoutB => Some(&LAYOUT_B),
            ButtonMapping::Identity => None,
        }
    }
}

/// Applies the latched permutation to decoded pad reports.
///
/// Invoked after every successful digital/analog pad decode, never for the
/// mouse. The first invocation latches the mapping; later invocations only
/// permute.
#[derive(Debug, Clone, Copy)]
pub struct RemapEngine {
    latched: Option<ButtonMapping>,
}

impl RemapEngine {
    #[must_use]
    pub const fn new() -> Self {
        Self { latched: None }
    }

    /// The latched mapping, or `None` before the first pad decode.
    #[must_use]
    pub const fn mapping(&self) -> Option<ButtonMapping> {
        self.latched
    }

    /// Remap the report's button bits in place.
    pub fn apply(&mut self, report: &mut JoystickReport) {
        let buttons_in = report.buttons();
        let mapping = *self.latched.get_or_insert_with(|| ButtonMapping::select(buttons_in));

        let Some(table) = mapping.table() else {
            return;
        };

        let raw_in = buttons_in.raw();
        let mut raw_out = raw_in & !PERMUTED_MASK;
        for (physical, &logical) in table.iter().enumerate() {
            if raw_in & (1 << physical) != 0 {
                raw_out |= 1 << logical;
            }
        }
        report.set_buttons(SaturnButtons(raw_out));
    }
}

impl Default for RemapEngine {
    fn default() -> Self {
        Self::new()
    }
}
