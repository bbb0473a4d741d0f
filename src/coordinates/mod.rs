//! Celestial coordinates used by starlist targets

pub mod angle;

pub use angle::{Angle, Sexagesimal};

use serde::{Deserialize, Serialize};

/// Equatorial coordinates (RA/Dec), J2000 / FK5
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Equatorial {
    pub ra: f64,  // Right ascension in radians
    pub dec: f64, // Declination in radians
}

impl Equatorial {
    pub fn new(ra: f64, dec: f64) -> Self {
        let normalized_ra = ra.rem_euclid(2.0 * std::f64::consts::PI);
        Equatorial {
            ra: normalized_ra,
            dec,
        }
    }

    /// Create a new Equatorial coordinate with values in degrees
    pub fn from_degrees(ra_deg: f64, dec_deg: f64) -> Self {
        Self::new(ra_deg.to_radians(), dec_deg.to_radians())
    }

    /// Create a new Equatorial coordinate from parsed angles
    pub fn from_angles(ra: Angle, dec: Angle) -> Self {
        Self::new(ra.to_radians(), dec.to_radians())
    }

    /// Get right ascension in degrees
    pub fn ra_degrees(&self) -> f64 {
        self.ra.to_degrees()
    }

    /// Get declination in degrees
    pub fn dec_degrees(&self) -> f64 {
        self.dec.to_degrees()
    }

    pub fn ra_angle(&self) -> Angle {
        Angle::from_radians(self.ra)
    }

    pub fn dec_angle(&self) -> Angle {
        Angle::from_radians(self.dec)
    }

    /// Position as `HHhMMmSS.SSs +DDdMMmSS.SSs`, for log and debug output
    pub fn to_hmsdms_string(&self) -> String {
        let ra = self.ra_angle().to_hms(2);
        let dec = self.dec_angle().to_dms(2);
        format!(
            "{:02}h{:02}m{:02}.{:02}s {}{:02}d{:02}m{:02}.{:02}s",
            ra.whole,
            ra.minutes,
            ra.seconds,
            ra.fraction,
            if dec.negative { '-' } else { '+' },
            dec.whole,
            dec.minutes,
            dec.seconds,
            dec.fraction
        )
    }
}
