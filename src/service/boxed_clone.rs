// The boxed service stores its inner trait object with `Send + Sync` bounds
// only when the `thread_safe` feature is enabled, so the two variants live in
// separate modules instead of sharing one definition.

#[cfg(feature = "thread_safe")]
mod thread_safe {
    use alloc::boxed::Box;

    use crate::service::base::Service;

    pub(crate) struct BoxCloneService<Request: ?Sized, Response, Error>(
        Box<dyn CloneService<Request, Response = Response, Error = Error> + Send + Sync>,
    );

    impl<Request: ?Sized, Response, Error> BoxCloneService<Request, Response, Error> {
        #[inline]
        pub(crate) fn new<S>(service: S) -> Self
        where
            S: Service<Request, Response = Response, Error = Error> + Clone + Send + Sync + 'static,
        {
            Self(Box::new(service))
        }
    }

    pub(crate) trait CloneService<Request: ?Sized>: Service<Request> {
        #[must_use]
        fn clone_box(
            &self,
        ) -> Box<dyn CloneService<Request, Response = Self::Response, Error = Self::Error> + Send + Sync>;
    }

    impl<Request, T> CloneService<Request> for T
    where
        Request: ?Sized,
        T: Service<Request> + Clone + Send + Sync + 'static,
    {
        #[inline]
        fn clone_box(
            &self,
        ) -> Box<dyn CloneService<Request, Response = T::Response, Error = T::Error> + Send + Sync>
        {
            Box::new(self.clone())
        }
    }

    impl<Request: ?Sized, Response, Error> Clone for BoxCloneService<Request, Response, Error> {
        #[inline]
        fn clone(&self) -> Self {
            Self(self.0.clone_box())
        }
    }

    impl<Request, Response, Error> Service<Request> for BoxCloneService<Request, Response, Error> {
        type Response = Response;
        type Error = Error;

        #[inline]
        fn call(&mut self, request: Request) -> Result<Self::Response, Self::Error> {
            self.0.call(request)
        }
    }
}

#[cfg(not(feature = "thread_safe"))]
mod thread_unsafe {
    use alloc::boxed::Box;

    use crate::service::base::Service;

    pub(crate) struct BoxCloneService<Request: ?Sized, Response, Error>(
        Box<dyn CloneService<Request, Response = Response, Error = Error>>,
    );

    impl<Request: ?Sized, Response, Error> BoxCloneService<Request, Response, Error> {
        #[inline]
        pub(crate) fn new<S>(service: S) -> Self
        where
            S: Service<Request, Response = Response, Error = Error> + Clone + 'static,
        {
            Self(Box::new(service))
        }
    }

    pub(crate) trait CloneService<Request: ?Sized>: Service<Request> {
        #[must_use]
        fn clone_box(
            &self,
        ) -> Box<dyn CloneService<Request, Response = Self::Response, Error = Self::Error>>;
    }

    impl<Request, T> CloneService<Request> for T
    where
        Request: ?Sized,
        T: Service<Request> + Clone + 'static,
    {
        #[inline]
        fn clone_box(
            &self,
        ) -> Box<dyn CloneService<Request, Response = T::Response, Error = T::Error>> {
            Box::new(self.clone())
        }
    }

    impl<Request: ?Sized, Response, Error> Clone for BoxCloneService<Request, Response, Error> {
        #[inline]
        fn clone(&self) -> Self {
            Self(self.0.clone_box())
        }
    }

    impl<Request, Response, Error> Service<Request> for BoxCloneService<Request, Response, Error> {
        type Response = Response;
        type Error = Error;

        #[inline]
        fn call(&mut self, request: Request) -> Result<Self::Response, Self::Error> {
            self.0.call(request)
        }
    }
}

#[cfg(feature = "thread_safe")]
pub(crate) use thread_safe::BoxCloneService;
#[cfg(not(feature = "thread_safe"))]
pub(crate) use thread_unsafe::BoxCloneService;
