mod fps;
mod page;
mod panels;
mod sidebar;
