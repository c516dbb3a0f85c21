//! Value and appearance state common to every slider style.

use glasskit_ui_graphics::Color;

use crate::appearance::{ControlState, ImageHandle, StateImages};
use crate::invalidation::Invalidations;

use super::value_mapper::ValueRange;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SliderImage {
    Thumb,
    MinimumTrack,
    MaximumTrack,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SliderModel {
    range: ValueRange,
    value: f32,
    pub continuous: bool,
    pub enabled: bool,
    minimum_track_tint: Option<Color>,
    maximum_track_tint: Option<Color>,
    thumb_tint: Option<Color>,
    thumb_images: StateImages,
    minimum_track_images: StateImages,
    maximum_track_images: StateImages,
    invalidations: Invalidations,
}

impl Default for SliderModel {
    fn default() -> Self {
        Self {
            range: ValueRange::default(),
            value: 0.0,
            continuous: true,
            enabled: true,
            minimum_track_tint: None,
            maximum_track_tint: None,
            thumb_tint: None,
            thumb_images: StateImages::default(),
            minimum_track_images: StateImages::default(),
            maximum_track_images: StateImages::default(),
            invalidations: Invalidations::NONE,
        }
    }
}

impl SliderModel {
    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn range(&self) -> ValueRange {
        self.range
    }

    /// Stores `value` clamped to the range; returns whether it changed.
    pub fn assign(&mut self, value: f32) -> bool {
        let clamped = self.range.clamp(value);
        if clamped == self.value {
            return false;
        }
        self.value = clamped;
        self.invalidate(Invalidations::THUMB_POSITION);
        true
    }

    /// Replaces the lower bound and re-clamps the value.
    pub fn set_minimum(&mut self, minimum: f32) -> bool {
        self.range.minimum = minimum;
        self.invalidate(Invalidations::THUMB_POSITION);
        self.assign(self.value)
    }

    pub fn set_maximum(&mut self, maximum: f32) -> bool {
        self.range.maximum = maximum;
        self.invalidate(Invalidations::THUMB_POSITION);
        self.assign(self.value)
    }

    pub fn minimum_track_tint(&self) -> Option<Color> {
        self.minimum_track_tint
    }

    pub fn maximum_track_tint(&self) -> Option<Color> {
        self.maximum_track_tint
    }

    pub fn thumb_tint(&self) -> Option<Color> {
        self.thumb_tint
    }

    pub fn set_minimum_track_tint(&mut self, tint: Option<Color>) {
        if self.minimum_track_tint != tint {
            self.minimum_track_tint = tint;
            self.invalidate(Invalidations::TRACK_TINT);
        }
    }

    pub fn set_maximum_track_tint(&mut self, tint: Option<Color>) {
        if self.maximum_track_tint != tint {
            self.maximum_track_tint = tint;
            self.invalidate(Invalidations::TRACK_TINT);
        }
    }

    pub fn set_thumb_tint(&mut self, tint: Option<Color>) -> bool {
        if self.thumb_tint == tint {
            return false;
        }
        self.thumb_tint = tint;
        self.invalidate(Invalidations::THUMB_TINT);
        true
    }

    fn images(&self, kind: SliderImage) -> &StateImages {
        match kind {
            SliderImage::Thumb => &self.thumb_images,
            SliderImage::MinimumTrack => &self.minimum_track_images,
            SliderImage::MaximumTrack => &self.maximum_track_images,
        }
    }

    pub fn image(&self, kind: SliderImage, state: ControlState) -> Option<&ImageHandle> {
        self.images(kind).get(state)
    }

    pub fn set_image(&mut self, kind: SliderImage, state: ControlState, image: Option<ImageHandle>) {
        let images = match kind {
            SliderImage::Thumb => &mut self.thumb_images,
            SliderImage::MinimumTrack => &mut self.minimum_track_images,
            SliderImage::MaximumTrack => &mut self.maximum_track_images,
        };
        if images.set(state, image) {
            self.invalidate(Invalidations::IMAGES);
        }
    }

    pub fn invalidate(&mut self, bits: Invalidations) {
        self.invalidations.insert(bits);
    }

    pub fn take_invalidations(&mut self) -> Invalidations {
        self.invalidations.take()
    }
}
