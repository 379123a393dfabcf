mod canvas;
mod connect;
mod details;
mod panels;
