//! Radial schematic for the presence view.
//!
//! Not a map: the requester sits at the centre and every nearby user is
//! spaced evenly on one ring, whatever their real distance.  The UI draws
//! the markers; this module only decides where they go and what they say.

use std::f64::consts::TAU;

use crate::NearbyUser;

/// Canvas geometry for [`radial_layout`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RadialLayout {
    pub width:       f64,
    pub height:      f64,
    /// Distance of every peer marker from the centre, canvas units.
    pub ring_radius: f64,
}

impl Default for RadialLayout {
    /// The 400 × 400 canvas with a 100-unit ring the web client used.
    fn default() -> Self {
        Self { width: 400.0, height: 400.0, ring_radius: 100.0 }
    }
}

impl RadialLayout {
    #[inline]
    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MarkerKind {
    /// The requester.
    Me,
    Peer,
}

/// One dot on the schematic.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Marker {
    pub kind:  MarkerKind,
    pub label: String,
    pub x:     f64,
    pub y:     f64,
}

/// Label shown under the requester's marker.
pub const ME_LABEL: &str = "You";

/// Place the requester at the centre and `users[i]` at angle `2π·i/n` on
/// the ring.  The first marker is always the requester.
///
/// Peer labels are the owner id up to the first `@`.
pub fn radial_layout(users: &[NearbyUser], layout: &RadialLayout) -> Vec<Marker> {
    let (cx, cy) = layout.center();
    let n = users.len();

    let mut markers = Vec::with_capacity(n + 1);
    markers.push(Marker { kind: MarkerKind::Me, label: ME_LABEL.to_owned(), x: cx, y: cy });

    for (i, user) in users.iter().enumerate() {
        let angle = TAU * i as f64 / n as f64;
        markers.push(Marker {
            kind:  MarkerKind::Peer,
            label: user.owner_id.short_label().to_owned(),
            x:     cx + angle.cos() * layout.ring_radius,
            y:     cy + angle.sin() * layout.ring_radius,
        });
    }
    markers
}
