use itertools::Itertools;
use owo_colors::OwoColorize;

/// Helper trait which can be used to display states, symbols, words and automata.
pub trait Show {
    /// Returns a human readable representation of `self`, for a state label that should be
    /// for example q0, q1, q2, ... and for a pair of states (q0, q1) it should be (q0, q1).
    /// Just use something that makes sense. This is mainly used for debugging purposes.
    fn show(&self) -> String;

    /// Show a collection of the thing, for a collection of states this should be {q0, q1, q2, ...}.
    fn show_collection<'a, I>(iter: I) -> String
    where
        Self: 'a,
        I: IntoIterator<Item = &'a Self>,
    {
        format!("{{{}}}", iter.into_iter().map(|x| x.show()).join(", "))
    }
}

macro_rules! impl_show_via_to_string {
    ($($t:ty),*) => {
        $(
            impl Show for $t {
                fn show(&self) -> String {
                    self.to_string()
                }
            }
        )*
    }
}

impl_show_via_to_string!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, char, String
);

impl Show for str {
    fn show(&self) -> String {
        self.to_string()
    }
}

impl Show for bool {
    fn show(&self) -> String {
        match self {
            true => "+",
            false => "-",
        }
        .to_string()
    }
}

impl Show for () {
    fn show(&self) -> String {
        "-".into()
    }
}

impl<S: Show + ?Sized> Show for &S {
    fn show(&self) -> String {
        S::show(*self)
    }
}

impl<S: Show, T: Show> Show for (S, T) {
    fn show(&self) -> String {
        format!("({}, {})", self.0.show(), self.1.show())
    }
}

impl<S: Show> Show for Option<S> {
    fn show(&self) -> String {
        match self {
            None => "⊥".to_string(),
            Some(x) => x.show(),
        }
    }
}

impl<S: Show> Show for [S] {
    fn show(&self) -> String {
        format!("\"{}\"", self.iter().map(|x| x.show()).join(""))
    }
}

impl<S: Show> Show for Vec<S> {
    fn show(&self) -> String {
        self.as_slice().show()
    }
}

impl<S: Show> Show for std::collections::BTreeSet<S> {
    fn show(&self) -> String {
        S::show_collection(self.iter())
    }
}

/// Renders the transition table of an automaton. Each row consists of the label of a state,
/// whether it is initial, whether it is accepting and one cell per column of `header`.
/// The initial state is marked with an arrow and accepting states with a star, if `colored`
/// is set the latter are additionally highlighted.
pub(crate) fn transition_table<H, R>(header: H, rows: R, colored: bool) -> String
where
    H: IntoIterator<Item = String>,
    R: IntoIterator<Item = (String, bool, bool, Vec<String>)>,
{
    let mut b = tabled::builder::Builder::default();
    b.push_record(std::iter::once(String::new()).chain(header));

    for (label, initial, accepting, cells) in rows {
        let arrow = if initial { "→ " } else { "" };
        let name = match (accepting, colored) {
            (true, true) => format!("{arrow}{label}*").green().bold().to_string(),
            (true, false) => format!("{arrow}{label}*"),
            (false, true) => format!("{arrow}{label}").dimmed().to_string(),
            (false, false) => format!("{arrow}{label}"),
        };
        b.push_record(std::iter::once(name).chain(cells));
    }

    b.build().with(tabled::settings::Style::ascii()).to_string()
}
