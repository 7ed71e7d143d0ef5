//! Touch-proximity keyboard geometry (C5, §4.3).
//!
//! Built once per keyboard layout from a [`KeyboardGeometry`]: keys are
//! bucketed into a coarse grid so that, given a touch point, the set of
//! "nearby enough" keys can be found in O(bin size) rather than scanning
//! every key.

use std::collections::HashMap;

use crate::char_utils::to_base_lower_case;
use crate::constants::{
    ADDITIONAL_PROXIMITY_CHAR_DELIMITER, EQUIVALENT_CHAR_WITHOUT_DISTANCE_INFO,
    KEYCODE_SPACE, MAX_PROXIMITY_CHARS_SIZE, NOT_A_COORDINATE, PROXIMITY_CHAR_WITHOUT_DISTANCE_INFO,
};
use crate::error::{EngineError, Result};
use crate::types::KeyboardGeometry;

/// Outcome of comparing a dictionary character against a typed position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProximityMatch {
    EquivalentChar,
    NearProximityChar,
    AdditionalProximityChar,
    UnrelatedChar,
}

/// Precomputed proximity geometry for one keyboard layout.
#[derive(Debug)]
pub struct ProximityInfo {
    keyboard_width: i32,
    keyboard_height: i32,
    grid_width: i32,
    grid_height: i32,
    common_key_width: i32,
    common_key_height: i32,
    cell_w: i32,
    cell_h: i32,
    /// `grid_width * grid_height` bins, each up to `MAX_PROXIMITY_CHARS_SIZE`
    /// key codes ordered by distance to the bin's representative point.
    bins: Vec<Vec<i32>>,
    keys: Vec<crate::types::KeyDescriptor>,
    key_index_by_code: HashMap<i32, usize>,
}

impl ProximityInfo {
    /// Validates geometry and precomputes the grid once.
    pub fn new(geometry: KeyboardGeometry) -> Result<Self> {
        if geometry.keys.is_empty() {
            return Err(EngineError::InvalidKeyboardGeometry {
                reason: "keyboard has no keys".into(),
            });
        }
        if geometry.grid_width <= 0 || geometry.grid_height <= 0 {
            return Err(EngineError::InvalidKeyboardGeometry {
                reason: "grid dimensions must be positive".into(),
            });
        }
        if geometry.keyboard_width <= 0 || geometry.keyboard_height <= 0 {
            return Err(EngineError::InvalidKeyboardGeometry {
                reason: "keyboard dimensions must be positive".into(),
            });
        }

        let cell_w = (geometry.keyboard_width + geometry.grid_width - 1) / geometry.grid_width;
        let cell_h = (geometry.keyboard_height + geometry.grid_height - 1) / geometry.grid_height;

        let mut key_index_by_code = HashMap::new();
        for (i, k) in geometry.keys.iter().enumerate() {
            key_index_by_code.entry(k.code).or_insert(i);
        }

        let bin_count = (geometry.grid_width * geometry.grid_height) as usize;
        let mut bins: Vec<Vec<i32>> = vec![Vec::new(); bin_count];
        let admission_radius_sq =
            i64::from(geometry.common_key_width) * i64::from(geometry.common_key_width);

        for gy in 0..geometry.grid_height {
            for gx in 0..geometry.grid_width {
                let cx = gx * cell_w + cell_w / 2;
                let cy = gy * cell_h + cell_h / 2;
                let mut ranked: Vec<(i64, i32)> = geometry
                    .keys
                    .iter()
                    .filter_map(|k| {
                        let dx = i64::from(k.x + k.width / 2 - cx);
                        let dy = i64::from(k.y + k.height / 2 - cy);
                        let d2 = dx * dx + dy * dy;
                        let inside = cx >= k.x
                            && cx < k.x + k.width
                            && cy >= k.y
                            && cy < k.y + k.height;
                        if inside || d2 < admission_radius_sq {
                            Some((d2, k.code))
                        } else {
                            None
                        }
                    })
                    .collect();
                ranked.sort_by_key(|&(d2, _)| d2);
                ranked.truncate(MAX_PROXIMITY_CHARS_SIZE);
                let idx = (gy * geometry.grid_width + gx) as usize;
                bins[idx] = ranked.into_iter().map(|(_, c)| c).collect();
            }
        }

        Ok(Self {
            keyboard_width: geometry.keyboard_width,
            keyboard_height: geometry.keyboard_height,
            grid_width: geometry.grid_width,
            grid_height: geometry.grid_height,
            common_key_width: geometry.common_key_width,
            common_key_height: geometry.common_key_height,
            cell_w,
            cell_h,
            bins,
            keys: geometry.keys,
            key_index_by_code,
        })
    }

    /// `getStartIndexFromCoordinates`: flat bin index for `(x, y)`.
    #[must_use]
    pub fn bin_index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.keyboard_width || y >= self.keyboard_height {
            return None;
        }
        let gx = (x / self.cell_w).min(self.grid_width - 1);
        let gy = (y / self.cell_h).min(self.grid_height - 1);
        Some((gy * self.grid_width + gx) as usize)
    }

    /// Nearby key codes for a touch point, primary key code first if
    /// known, truncated to `MAX_PROXIMITY_CHARS_SIZE`.
    #[must_use]
    pub fn proximity_chars_at(&self, x: i32, y: i32) -> &[i32] {
        match self.bin_index(x, y) {
            Some(i) => &self.bins[i],
            None => &[],
        }
    }

    /// `hasSpaceProximity`.
    #[must_use]
    pub fn has_space_proximity(&self, x: i32, y: i32) -> bool {
        self.proximity_chars_at(x, y).contains(&KEYCODE_SPACE)
    }

    /// Builds the per-position proximity list used by [`crate::types::InputState`]:
    /// primary typed code first, then near-proximity bin members (minus
    /// the primary), a delimiter, then nothing further (additional
    /// "often confused but not adjacent" keys are a layout-specific
    /// extension the reference keyboard data doesn't supply here).
    #[must_use]
    pub fn build_proximity_list(&self, code: i32, x: i32, y: i32) -> Vec<i32> {
        let mut list = vec![code];
        for &c in self.proximity_chars_at(x, y) {
            if c != code {
                list.push(c);
            }
        }
        list.push(ADDITIONAL_PROXIMITY_CHAR_DELIMITER);
        list
    }

    /// `getMatchedProximityId`.
    #[must_use]
    pub fn matched_proximity_id(
        &self,
        primary_typed: i32,
        candidate: u16,
        proximity_list: &[i32],
        check_proximity_chars: bool,
    ) -> ProximityMatch {
        let candidate = i32::from(candidate);
        if candidate == primary_typed {
            return ProximityMatch::EquivalentChar;
        }
        if !check_proximity_chars {
            return ProximityMatch::UnrelatedChar;
        }
        if to_base_lower_case(candidate as u16) == to_base_lower_case(primary_typed as u16) {
            return ProximityMatch::NearProximityChar;
        }
        let mut past_delimiter = false;
        for &c in proximity_list {
            if c == ADDITIONAL_PROXIMITY_CHAR_DELIMITER {
                past_delimiter = true;
                continue;
            }
            if c == candidate {
                return if past_delimiter {
                    ProximityMatch::AdditionalProximityChar
                } else {
                    ProximityMatch::NearProximityChar
                };
            }
        }
        ProximityMatch::UnrelatedChar
    }

    /// `getNormalizedSquaredDistance`: calibrated distance for
    /// equivalent/near matches, else the "without distance info"
    /// sentinels.
    #[must_use]
    pub fn normalized_squared_distance(
        &self,
        x: i32,
        y: i32,
        candidate_code: i32,
        m: ProximityMatch,
    ) -> i32 {
        if !matches!(m, ProximityMatch::EquivalentChar | ProximityMatch::NearProximityChar) {
            return PROXIMITY_CHAR_WITHOUT_DISTANCE_INFO;
        }
        let Some(&key_idx) = self.key_index_by_code.get(&candidate_code) else {
            return if matches!(m, ProximityMatch::EquivalentChar) {
                EQUIVALENT_CHAR_WITHOUT_DISTANCE_INFO
            } else {
                PROXIMITY_CHAR_WITHOUT_DISTANCE_INFO
            };
        };
        let key = &self.keys[key_idx];
        if x == NOT_A_COORDINATE || y == NOT_A_COORDINATE || key.sweet_spot_radius <= 0.0 {
            return if matches!(m, ProximityMatch::EquivalentChar) {
                EQUIVALENT_CHAR_WITHOUT_DISTANCE_INFO
            } else {
                PROXIMITY_CHAR_WITHOUT_DISTANCE_INFO
            };
        }
        let dx = x as f32 - key.sweet_spot_x;
        let dy = y as f32 - key.sweet_spot_y;
        let scaled = (dx * dx + dy * dy) / (key.sweet_spot_radius * key.sweet_spot_radius);
        // Scale into the fixed-point range the ranking formula expects.
        (scaled * 256.0) as i32
    }

    /// `existsAdjacentProximityChars`: true if the neighbouring typed
    /// position's primary code is in this position's bin.
    #[must_use]
    pub fn exists_adjacent_proximity_chars(&self, codes: &[u16], xs: &[i32], ys: &[i32], index: usize) -> bool {
        let primary = i32::from(codes[index]);
        let check = |i: usize| -> bool {
            if i >= codes.len() {
                return false;
            }
            self.proximity_chars_at(xs[i], ys[i]).contains(&primary)
        };
        (index > 0 && check(index - 1)) || check(index + 1)
    }

    #[must_use]
    pub fn common_key_width(&self) -> i32 {
        self.common_key_width
    }

    #[must_use]
    pub fn common_key_height(&self) -> i32 {
        self.common_key_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::KeyDescriptor;

    fn qwerty_h() -> KeyboardGeometry {
        KeyboardGeometry {
            keyboard_width: 300,
            keyboard_height: 100,
            grid_width: 10,
            grid_height: 4,
            common_key_width: 30,
            common_key_height: 40,
            keys: vec![
                KeyDescriptor {
                    code: i32::from(b'h'),
                    x: 0,
                    y: 0,
                    width: 30,
                    height: 40,
                    sweet_spot_x: 15.0,
                    sweet_spot_y: 20.0,
                    sweet_spot_radius: 20.0,
                },
                KeyDescriptor {
                    code: i32::from(b'g'),
                    x: 30,
                    y: 0,
                    width: 30,
                    height: 40,
                    sweet_spot_x: 45.0,
                    sweet_spot_y: 20.0,
                    sweet_spot_radius: 20.0,
                },
            ],
        }
    }

    #[test]
    fn test_rejects_empty_keys() {
        let mut g = qwerty_h();
        g.keys.clear();
        assert!(ProximityInfo::new(g).is_err());
    }

    #[test]
    fn test_equivalent_char_at_primary_slot() {
        let info = ProximityInfo::new(qwerty_h()).unwrap();
        let list = info.build_proximity_list(i32::from(b'h'), 15, 20);
        let m = info.matched_proximity_id(i32::from(b'h'), b'h' as u16, &list, true);
        assert_eq!(m, ProximityMatch::EquivalentChar);
    }

    #[test]
    fn test_near_proximity_for_adjacent_key() {
        let info = ProximityInfo::new(qwerty_h()).unwrap();
        let list = info.build_proximity_list(i32::from(b'h'), 15, 20);
        let m = info.matched_proximity_id(i32::from(b'h'), b'g' as u16, &list, true);
        assert_eq!(m, ProximityMatch::NearProximityChar);
    }

    #[test]
    fn test_unrelated_without_proximity_check() {
        let info = ProximityInfo::new(qwerty_h()).unwrap();
        let list = info.build_proximity_list(i32::from(b'h'), 15, 20);
        let m = info.matched_proximity_id(i32::from(b'h'), b'g' as u16, &list, false);
        assert_eq!(m, ProximityMatch::UnrelatedChar);
    }
}
