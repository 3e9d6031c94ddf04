mod pixel;
mod text;
