//! Socket tables shared by memory banks and peripheral racks.
//!
//! A [`SlotTable`] is a fixed array of typed sockets. Each socket carries:
//! 1. **A type constraint:** Only an occupant whose [`SlotOccupant::kind`] matches may
//!    be plugged.
//! 2. **A pluggable flag:** Non-pluggable sockets are populated at construction
//!    (hardware soldered to the board) and refuse every later plug or unplug.
//! 3. **A source flag:** Memory sockets the processor may fetch its program from.
//!
//! Occupants are owned by the table. Unplugging hands ownership back to the caller;
//! a rejected plug hands the occupant back unchanged.

use std::fmt;

/// Something that can sit in a socket.
pub trait SlotOccupant {
    /// Device-type tag compared against the socket constraint.
    type Kind: Copy + Eq + fmt::Debug;

    /// Returns the device-type tag of this occupant.
    fn kind(&self) -> Self::Kind;
}

/// Static description of one socket.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotSpec<K> {
    /// Device type accepted by the socket.
    pub kind: K,
    /// Whether the occupant may be changed at runtime.
    pub pluggable: bool,
    /// Whether the socket may be selected as the program source.
    pub source_capable: bool,
}

impl<K> SlotSpec<K> {
    /// A pluggable socket that cannot serve as the program source.
    pub const fn pluggable(kind: K) -> Self {
        Self {
            kind,
            pluggable: true,
            source_capable: false,
        }
    }

    /// A pluggable socket that can serve as the program source.
    pub const fn source(kind: K) -> Self {
        Self {
            kind,
            pluggable: true,
            source_capable: true,
        }
    }

    /// A soldered socket, populated once at construction.
    pub const fn fixed(kind: K) -> Self {
        Self {
            kind,
            pluggable: false,
            source_capable: false,
        }
    }
}

struct Slot<O: SlotOccupant> {
    spec: SlotSpec<O::Kind>,
    occupant: Option<O>,
}

/// Fixed-size table of typed sockets.
pub struct SlotTable<O: SlotOccupant> {
    slots: Vec<Slot<O>>,
}

impl<O: SlotOccupant> fmt::Debug for SlotTable<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.slots
                    .iter()
                    .map(|slot| (slot.spec, slot.occupant.as_ref().map(SlotOccupant::kind))),
            )
            .finish()
    }
}

impl<O: SlotOccupant> SlotTable<O> {
    /// Creates a table with one empty socket per spec.
    pub fn new(specs: impl IntoIterator<Item = SlotSpec<O::Kind>>) -> Self {
        Self {
            slots: specs
                .into_iter()
                .map(|spec| Slot {
                    spec,
                    occupant: None,
                })
                .collect(),
        }
    }

    /// Number of sockets.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if the table has no sockets at all.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the spec of socket `index`.
    pub fn spec(&self, index: usize) -> Option<SlotSpec<O::Kind>> {
        self.slots.get(index).map(|slot| slot.spec)
    }

    /// Returns `true` if socket `index` exists and is occupied.
    pub fn is_occupied(&self, index: usize) -> bool {
        self.occupant(index).is_some()
    }

    /// Returns the occupant of socket `index`.
    pub fn occupant(&self, index: usize) -> Option<&O> {
        self.slots.get(index)?.occupant.as_ref()
    }

    /// Returns the occupant of socket `index` for mutation.
    pub fn occupant_mut(&mut self, index: usize) -> Option<&mut O> {
        self.slots.get_mut(index)?.occupant.as_mut()
    }

    /// Plugs `occupant` into socket `index`.
    ///
    /// # Returns
    ///
    /// `Err(occupant)` unless the socket exists, is pluggable, accepts the occupant's
    /// type, and is empty.
    pub fn plug(&mut self, index: usize, occupant: O) -> Result<(), O> {
        let Some(slot) = self.slots.get_mut(index) else {
            return Err(occupant);
        };
        if !slot.spec.pluggable || slot.spec.kind != occupant.kind() || slot.occupant.is_some() {
            return Err(occupant);
        }
        slot.occupant = Some(occupant);
        Ok(())
    }

    /// Populates socket `index` regardless of its pluggable flag.
    ///
    /// Used by board constructors to solder fixed hardware. Type and vacancy are still
    /// enforced.
    pub(crate) fn install(&mut self, index: usize, occupant: O) -> Result<(), O> {
        match self.slots.get_mut(index) {
            Some(slot) if slot.spec.kind == occupant.kind() && slot.occupant.is_none() => {
                slot.occupant = Some(occupant);
                Ok(())
            }
            _ => Err(occupant),
        }
    }

    /// Removes and returns the occupant of a pluggable socket.
    pub fn unplug(&mut self, index: usize) -> Option<O> {
        let slot = self.slots.get_mut(index)?;
        if !slot.spec.pluggable {
            return None;
        }
        slot.occupant.take()
    }

    /// Empties every pluggable socket, returning the removed occupants in socket order.
    pub fn unplug_all(&mut self) -> Vec<O> {
        self.slots
            .iter_mut()
            .filter(|slot| slot.spec.pluggable)
            .filter_map(|slot| slot.occupant.take())
            .collect()
    }

    /// Iterates over `(index, spec, occupant)` for every socket.
    pub fn iter(&self) -> impl Iterator<Item = (usize, SlotSpec<O::Kind>, Option<&O>)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(index, slot)| (index, slot.spec, slot.occupant.as_ref()))
    }

    /// Iterates over `(index, occupant)` for every occupied socket.
    pub fn occupants_mut(&mut self) -> impl Iterator<Item = (usize, &mut O)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(index, slot)| slot.occupant.as_mut().map(|occupant| (index, occupant)))
    }
}
