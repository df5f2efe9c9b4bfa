//! Blade directive recognition.
//!
//! A two-tier heuristic: a fixed vocabulary of control-flow and layout
//! directives, plus the generic shape `@identifier` / `@identifier(...)`.
//! Anything else that happens to start with `@` is prose.

/// Control-flow and markup directives recognised by name.
pub const BLADE_DIRECTIVES: &[&str] = &[
    "if",
    "elseif",
    "else",
    "endif",
    "foreach",
    "endforeach",
    "for",
    "endfor",
    "while",
    "endwhile",
    "switch",
    "case",
    "break",
    "default",
    "endswitch",
    "php",
    "endphp",
    "push",
    "endpush",
    "stack",
    "section",
    "endsection",
    "yield",
    "show",
    "stop",
    "include",
    "extends",
    "component",
    "endcomponent",
    "slot",
    "endslot",
    "props",
    "aware",
    "auth",
    "endauth",
    "guest",
    "endguest",
    "can",
    "endcan",
    "cannot",
    "endcannot",
    "error",
    "enderror",
    "empty",
    "endempty",
    "isset",
    "endisset",
    "unless",
    "endunless",
    "hasSection",
    "sectionMissing",
    "continue",
];

fn is_known_directive(name: &str) -> bool {
    BLADE_DIRECTIVES.contains(&name)
}

/// Check whether trimmed text is a Blade directive rather than prose.
///
/// ```
/// use bladeloc::core::directives::is_blade_directive;
///
/// assert!(is_blade_directive("@endif"));
/// assert!(is_blade_directive("@include('nav')"));
/// assert!(is_blade_directive("@csrf"));
/// assert!(is_blade_directive("@vite(['app.css'])"));
/// assert!(!is_blade_directive("@Hello world"));
/// assert!(!is_blade_directive("@ the office"));
/// assert!(!is_blade_directive("Hello"));
/// ```
pub fn is_blade_directive(text: &str) -> bool {
    if text.starts_with("block(") {
        return true;
    }
    let Some(directive_part) = text.strip_prefix('@') else {
        return false;
    };

    let name = directive_part
        .split('(')
        .next()
        .and_then(|s| s.split(' ').next())
        .unwrap_or_default()
        .trim();

    if is_known_directive(name) {
        return true;
    }

    // Custom directives: `@word` or `@word(...)`.
    !name.is_empty()
        && name.chars().all(char::is_alphabetic)
        && directive_part
            .strip_prefix(name)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('('))
}
