/// Asserts that each element occurs in `content`, each one after the end of the previous match.
#[macro_export]
macro_rules! assert_contains_inorder {
    ($content:expr, [$($element:expr,)+]) => {
        let _remainder: &str = &$content;
        $(
            let element = $element;
            let message = format!("unmatched ordered element\nexpected:\n{}\nremaining content:\n{}\n", element, _remainder);
            let (_, _remainder) = _remainder.split_once(element).expect(message.as_str());
        )*
    };
}
