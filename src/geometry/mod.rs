pub mod point;
pub mod point_cloud;
pub mod triangle;

pub use self::point::Point3;
pub use self::point_cloud::PointCloud;
pub use self::triangle::Triangle;
