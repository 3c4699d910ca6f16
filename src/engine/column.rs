// src/engine/column.rs

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

type Accessor<R> = Rc<dyn Fn(&R) -> CellValue>;

/// A single cell value: the common currency of filter accessors and sort
/// keys.
///
/// The total order ranks variants (`Missing` < `Bool` < numbers < `Text`)
/// and compares within a variant naturally; `Int` and `Float` compare
/// against each other numerically. Mixed-type columns therefore order
/// consistently even when the ordering is not semantically meaningful.
#[derive(Debug, Clone)]
pub enum CellValue {
    Missing,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    /// Whether the value counts as present for filtering purposes.
    ///
    /// Empty strings, numeric zero, `false`, and `Missing` are all absent.
    /// If zero or `false` ever become legitimate filterable values, this
    /// rule is the place to revisit.
    pub fn is_present(&self) -> bool {
        match self {
            CellValue::Missing => false,
            CellValue::Bool(b) => *b,
            CellValue::Int(n) => *n != 0,
            CellValue::Float(x) => *x != 0.0,
            CellValue::Text(s) => !s.is_empty(),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            CellValue::Missing => 0,
            CellValue::Bool(_) => 1,
            CellValue::Int(_) | CellValue::Float(_) => 2,
            CellValue::Text(_) => 3,
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(n) => Some(*n as f64),
            CellValue::Float(x) => Some(*x),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Missing => Ok(()),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Int(n) => write!(f, "{}", n),
            CellValue::Float(x) => write!(f, "{}", x),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
            (CellValue::Int(a), CellValue::Int(b)) => a.cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                _ => self.rank().cmp(&other.rank()),
            },
        }
    }
}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Equality must agree with the total order, so Int(1) == Float(1.0).
impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CellValue {}

/// A column descriptor: identity, display title, and the optional
/// filtering/ordering capabilities the view engine acts through.
///
/// The engine never looks inside a record; whatever a column cannot
/// produce through an accessor does not exist for it. Ids must be unique
/// within a descriptor set.
pub struct Column<R> {
    id: String,
    title: String,
    filter_by: Option<Accessor<R>>,
    order_by: Option<Accessor<R>>,
}

impl<R> Column<R> {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            filter_by: None,
            order_by: None,
        }
    }

    /// Attach a filtering capability.
    pub fn with_filter(mut self, accessor: impl Fn(&R) -> CellValue + 'static) -> Self {
        self.filter_by = Some(Rc::new(accessor));
        self
    }

    /// Attach an ordering capability.
    pub fn with_order(mut self, accessor: impl Fn(&R) -> CellValue + 'static) -> Self {
        self.order_by = Some(Rc::new(accessor));
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn can_filter(&self) -> bool {
        self.filter_by.is_some()
    }

    pub fn can_order(&self) -> bool {
        self.order_by.is_some()
    }

    /// The value the filter predicate sees; `Missing` when the column has
    /// no filtering capability.
    pub fn filter_value(&self, record: &R) -> CellValue {
        match &self.filter_by {
            Some(accessor) => accessor(record),
            None => CellValue::Missing,
        }
    }

    /// The key the sorter compares; `Missing` when the column has no
    /// ordering capability.
    pub fn order_key(&self, record: &R) -> CellValue {
        match &self.order_by {
            Some(accessor) => accessor(record),
            None => CellValue::Missing,
        }
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            title: self.title.clone(),
            filter_by: self.filter_by.clone(),
            order_by: self.order_by.clone(),
        }
    }
}
