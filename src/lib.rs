// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) uses these modules to implement the interactive client.
//
// Module responsibilities:
// - `api`: Encapsulates the HTTP interaction with the recommendation
//   server (`POST /recommend`) and the wire types it exchanges.
// - `ui`: Implements the terminal flows (menu, title prompt, submission)
//   and renders recommendation cards and status messages.
//
// Keeping this separation makes it possible to test the request handling
// and the rendering without a terminal attached.
pub mod api;
pub mod ui;
