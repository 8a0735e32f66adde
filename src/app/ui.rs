mod editor;
mod list;
mod topbar;
mod transcript;
