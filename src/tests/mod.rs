//! End-to-end checks of the calculator through the library's public API.
