mod api;
mod session_ttl;
