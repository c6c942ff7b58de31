use core::ops::{Add, Mul, Sub};

use crate::Error;

/// Integer pixel location in the plane spanned by axes 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point2i {
    pub x: i64,
    pub y: i64,
}

impl Point2i {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Two-component displacement, `x` horizontal and `y` vertical.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2d {
    pub x: f64,
    pub y: f64,
}

impl Vec2d {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn norm(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn component(self, channel: Channel) -> f64 {
        match channel {
            Channel::Horizontal => self.x,
            Channel::Vertical => self.y,
        }
    }
}

impl Add for Vec2d {
    type Output = Vec2d;

    fn add(self, rhs: Vec2d) -> Self::Output {
        Vec2d {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for Vec2d {
    type Output = Vec2d;

    fn sub(self, rhs: Vec2d) -> Self::Output {
        Vec2d {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Mul<f64> for Vec2d {
    type Output = Vec2d;

    fn mul(self, rhs: f64) -> Self::Output {
        Vec2d {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

/// Component stored at a given coordinate of a displacement field's channel
/// axis (axis 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Horizontal,
    Vertical,
}

impl Channel {
    /// `0` is horizontal, `1` is vertical; anything else is rejected.
    pub fn from_index(index: i64) -> Result<Self, Error> {
        match index {
            0 => Ok(Self::Horizontal),
            1 => Ok(Self::Vertical),
            channel => Err(Error::ChannelOutOfRange { channel }),
        }
    }

    pub fn index(self) -> i64 {
        match self {
            Self::Horizontal => 0,
            Self::Vertical => 1,
        }
    }
}
