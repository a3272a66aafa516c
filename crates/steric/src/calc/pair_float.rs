//! Double-double scalar (`hi + lo`) for sign-sensitive predicates.
//!
//! Model
//! - A value is the unevaluated sum `hi + lo` with `|lo| <= ulp(hi)/2`.
//! - Addition uses Knuth two-sum, multiplication Dekker splitting with
//!   `SPLIT = 2^27 + 1`, division one Newton-style correction step.
//! - Values are `Copy`; every operation returns a fresh value.
//!
//! References
//! - Dekker, "A floating-point technique for extending the available precision" (1971).
//! - Shewchuk, "Adaptive precision floating-point arithmetic" (1997).

use std::cmp::Ordering;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Extended-precision real `hi + lo`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PairFloat {
    hi: f64,
    lo: f64,
}

impl PairFloat {
    /// Dekker split constant `2^27 + 1`.
    pub const SPLIT: f64 = 134_217_729.0;

    pub const ZERO: PairFloat = PairFloat { hi: 0.0, lo: 0.0 };

    #[inline]
    pub const fn new(hi: f64, lo: f64) -> Self {
        Self { hi, lo }
    }

    #[inline]
    pub const fn from_f64(x: f64) -> Self {
        Self { hi: x, lo: 0.0 }
    }

    #[inline]
    pub fn hi(self) -> f64 {
        self.hi
    }

    #[inline]
    pub fn lo(self) -> f64 {
        self.lo
    }

    /// Nearest double to the represented value.
    #[inline]
    pub fn value(self) -> f64 {
        self.hi + self.lo
    }

    /// `self + y` for a plain double.
    pub fn add_f64(self, y: f64) -> Self {
        let s_hi = self.hi + y;
        let e = s_hi - self.hi;
        let s = s_hi - e;
        let s = (y - e) + (self.hi - s);
        let f = s + self.lo;
        let h_hi = s_hi + f;
        let h = f + (s_hi - h_hi);
        let hi = h_hi + h;
        Self {
            hi,
            lo: h + (h_hi - hi),
        }
    }

    /// `self + y` with both operands in double-double.
    pub fn add_pair(self, y: PairFloat) -> Self {
        let s_hi = self.hi + y.hi;
        let t_hi = self.lo + y.lo;
        let e = s_hi - self.hi;
        let f = t_hi - self.lo;
        let s = s_hi - e;
        let t = t_hi - f;
        let s = (y.hi - e) + (self.hi - s);
        let t = (y.lo - f) + (self.lo - t);
        let e = s + t_hi;
        let h_hi = s_hi + e;
        let h = e + (s_hi - h_hi);
        let e = t + h;
        let hi = h_hi + e;
        Self {
            hi,
            lo: e + (h_hi - hi),
        }
    }

    #[inline]
    pub fn sub_f64(self, y: f64) -> Self {
        self.add_f64(-y)
    }

    #[inline]
    pub fn sub_pair(self, y: PairFloat) -> Self {
        self.add_pair(-y)
    }

    #[inline]
    pub fn mul_f64(self, y: f64) -> Self {
        self.mul_pair(Self::from_f64(y))
    }

    pub fn mul_pair(self, y: PairFloat) -> Self {
        let c = Self::SPLIT * self.hi;
        let hx = c - self.hi;
        let cy = Self::SPLIT * y.hi;
        let hx = c - hx;
        let tx = self.hi - hx;
        let hy = cy - y.hi;
        let prod = self.hi * y.hi;
        let hy = cy - hy;
        let ty = y.hi - hy;
        let err = ((((hx * hy - prod) + hx * ty) + tx * hy) + tx * ty)
            + (self.hi * y.lo + self.lo * y.hi);
        let hi = prod + err;
        Self {
            hi,
            lo: err + (prod - hi),
        }
    }

    #[inline]
    pub fn div_f64(self, y: f64) -> Self {
        self.div_pair(Self::from_f64(y))
    }

    pub fn div_pair(self, y: PairFloat) -> Self {
        let q = self.hi / y.hi;
        let c = Self::SPLIT * q;
        let hc = c - q;
        let u = Self::SPLIT * y.hi;
        let hc = c - hc;
        let tc = q - hc;
        let hy = u - y.hi;
        let big_u = q * y.hi;
        let hy = u - hy;
        let ty = y.hi - hy;
        let u = (((hc * hy - big_u) + hc * ty) + tc * hy) + tc * ty;
        let corr = ((((self.hi - big_u) - u) + self.lo) - q * y.lo) / y.hi;
        let hi = q + corr;
        Self {
            hi,
            lo: (q - hi) + corr,
        }
    }

    /// -1, 0 or 1.
    #[inline]
    pub fn signum(self) -> i32 {
        if self.hi > 0.0 {
            1
        } else if self.hi < 0.0 {
            -1
        } else if self.lo > 0.0 {
            1
        } else if self.lo < 0.0 {
            -1
        } else {
            0
        }
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.hi == 0.0 && self.lo == 0.0
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        self.signum() < 0
    }

    #[inline]
    pub fn is_positive(self) -> bool {
        self.signum() > 0
    }

    #[inline]
    pub fn abs(self) -> Self {
        if self.is_negative() {
            -self
        } else {
            self
        }
    }

    /// `x1 * y2 - y1 * x2` evaluated in double-double.
    pub fn determinant(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::from_f64(x1)
            .mul_f64(y2)
            .sub_pair(Self::from_f64(y1).mul_f64(x2))
    }
}

impl From<f64> for PairFloat {
    fn from(x: f64) -> Self {
        Self::from_f64(x)
    }
}

impl Neg for PairFloat {
    type Output = PairFloat;
    fn neg(self) -> PairFloat {
        PairFloat::new(-self.hi, -self.lo)
    }
}

impl Add for PairFloat {
    type Output = PairFloat;
    fn add(self, rhs: PairFloat) -> PairFloat {
        self.add_pair(rhs)
    }
}

impl Add<f64> for PairFloat {
    type Output = PairFloat;
    fn add(self, rhs: f64) -> PairFloat {
        self.add_f64(rhs)
    }
}

impl Sub for PairFloat {
    type Output = PairFloat;
    fn sub(self, rhs: PairFloat) -> PairFloat {
        self.sub_pair(rhs)
    }
}

impl Sub<f64> for PairFloat {
    type Output = PairFloat;
    fn sub(self, rhs: f64) -> PairFloat {
        self.sub_f64(rhs)
    }
}

impl Mul for PairFloat {
    type Output = PairFloat;
    fn mul(self, rhs: PairFloat) -> PairFloat {
        self.mul_pair(rhs)
    }
}

impl Mul<f64> for PairFloat {
    type Output = PairFloat;
    fn mul(self, rhs: f64) -> PairFloat {
        self.mul_f64(rhs)
    }
}

impl Div for PairFloat {
    type Output = PairFloat;
    fn div(self, rhs: PairFloat) -> PairFloat {
        self.div_pair(rhs)
    }
}

impl Div<f64> for PairFloat {
    type Output = PairFloat;
    fn div(self, rhs: f64) -> PairFloat {
        self.div_f64(rhs)
    }
}

impl PartialOrd for PairFloat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.hi.partial_cmp(&other.hi)? {
            Ordering::Equal => self.lo.partial_cmp(&other.lo),
            ord => Some(ord),
        }
    }
}
