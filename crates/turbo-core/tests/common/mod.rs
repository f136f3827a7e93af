pub mod companion_server;
