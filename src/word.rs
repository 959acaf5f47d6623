/// A finite word is a finite sequence of symbols that can be fed into an automaton. This is
/// implemented for strings (as words over `char`), slices, arrays and vectors, so that for
/// example `dfa.accepts("0101")` and `dfa.accepts(&[0u8, 1, 0, 1])` both work.
pub trait FiniteWord<S> {
    /// The type of iterator over the symbols of the word.
    type Symbols<'this>: Iterator<Item = S>
    where
        Self: 'this;

    /// Returns an iterator over the symbols of the word, from first to last.
    fn symbols(&self) -> Self::Symbols<'_>;
}

impl FiniteWord<char> for str {
    type Symbols<'this> = std::str::Chars<'this> where Self: 'this;

    fn symbols(&self) -> Self::Symbols<'_> {
        self.chars()
    }
}

impl FiniteWord<char> for String {
    type Symbols<'this> = std::str::Chars<'this> where Self: 'this;

    fn symbols(&self) -> Self::Symbols<'_> {
        self.chars()
    }
}

impl<S: Clone> FiniteWord<S> for [S] {
    type Symbols<'this> = std::iter::Cloned<std::slice::Iter<'this, S>> where Self: 'this;

    fn symbols(&self) -> Self::Symbols<'_> {
        self.iter().cloned()
    }
}

impl<S: Clone, const N: usize> FiniteWord<S> for [S; N] {
    type Symbols<'this> = std::iter::Cloned<std::slice::Iter<'this, S>> where Self: 'this;

    fn symbols(&self) -> Self::Symbols<'_> {
        self.iter().cloned()
    }
}

impl<S: Clone> FiniteWord<S> for Vec<S> {
    type Symbols<'this> = std::iter::Cloned<std::slice::Iter<'this, S>> where Self: 'this;

    fn symbols(&self) -> Self::Symbols<'_> {
        self.iter().cloned()
    }
}

impl<S, W: FiniteWord<S> + ?Sized> FiniteWord<S> for &W {
    type Symbols<'this> = W::Symbols<'this> where Self: 'this;

    fn symbols(&self) -> Self::Symbols<'_> {
        (**self).symbols()
    }
}
